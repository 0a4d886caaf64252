//! Product records as returned by the ordering API.

use bistro::products::Product;
use serde_json::Value;
use tracing::warn;

use crate::{domain::products::errors::ProductsServiceError, http::unwrap_list};

/// Decode a product list response.
///
/// # Errors
///
/// Returns [`ProductsServiceError::UnexpectedResponse`] if the body is not a
/// list in any of the accepted envelopes.
pub fn decode_product_list(body: Value) -> Result<Vec<Product>, ProductsServiceError> {
    let records = unwrap_list(body).ok_or(ProductsServiceError::UnexpectedResponse)?;

    Ok(decode_products(records))
}

/// Decode product records, skipping malformed ones and anything not on sale.
pub fn decode_products(records: Vec<Value>) -> Vec<Product> {
    let decoded = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Product>(record) {
            Ok(product) => Some(product),
            Err(error) => {
                warn!(index, %error, "skipping malformed product record");

                None
            }
        });

    bistro::products::available(decoded)
}
