//! Response envelopes.
//!
//! The ordering API answers list endpoints either with a bare array or with
//! `{ "data": [...] }`, and single resources with `{ "data": {...} }`.

use serde_json::Value;

/// Extract the records of a list response.
///
/// Accepts a bare array, `{ "data": [...] }` and the paginated
/// `{ "data": { "data": [...] } }`. Anything else yields no records.
pub fn unwrap_list(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Array(records) => Some(records),
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(records)) => Some(records),
            Some(Value::Object(mut page)) => match page.remove("data") {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

/// Extract the resource of a single-item response.
///
/// A missing or `null` `data` field yields `None`.
pub fn unwrap_item(body: Value) -> Option<Value> {
    match body {
        Value::Object(mut object) => object.remove("data").filter(|data| !data.is_null()),
        _ => None,
    }
}
