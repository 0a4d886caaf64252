//! Posts service errors.

use thiserror::Error;

use crate::http::ApiError;

/// Errors raised while loading posts.
#[derive(Debug, Error)]
pub enum PostsServiceError {
    /// The post does not exist or is not published.
    #[error("post not found")]
    NotFound,

    /// The ordering API request failed.
    #[error("failed to load posts")]
    Api(#[source] ApiError),

    /// A post record could not be decoded.
    #[error("invalid post record")]
    InvalidRecord(#[source] serde_json::Error),

    /// The response is not a post list.
    #[error("unexpected post list response")]
    UnexpectedResponse,
}

impl From<ApiError> for PostsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
