//! Cart store errors.

use bistro::{cart::CartError, products::ProductId};
use thiserror::Error;

use crate::domain::cart::storage::StorageError;

/// Errors raised by [`CartStore`](crate::domain::cart::CartStore) mutations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// No line exists for the product.
    #[error("product {0} is not in the cart")]
    LineNotFound(ProductId),

    /// The cart could not be encoded for storage.
    #[error("failed to encode cart")]
    Encode(#[source] serde_json::Error),

    /// The cart could not be persisted.
    #[error("failed to persist cart")]
    Storage(#[from] StorageError),
}

impl From<CartError> for CartStoreError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::LineNotFound(id) => Self::LineNotFound(id),
        }
    }
}
