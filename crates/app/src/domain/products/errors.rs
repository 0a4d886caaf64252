//! Products service errors.

use thiserror::Error;

use crate::http::ApiError;

/// Errors raised while loading products.
#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// The ordering API request failed.
    #[error("failed to load products")]
    Api(#[from] ApiError),

    /// The response is neither a list nor a list envelope.
    #[error("unexpected product list response")]
    UnexpectedResponse,
}
