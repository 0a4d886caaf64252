//! Post records as returned by the ordering API.

use bistro::posts::Post;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    domain::posts::errors::PostsServiceError,
    http::{unwrap_item, unwrap_list},
};

/// Decode a single post response.
///
/// A `null` or missing record and an unpublished post both count as not
/// found.
///
/// # Errors
///
/// Returns [`PostsServiceError::NotFound`] as above, or
/// [`PostsServiceError::InvalidRecord`] if the record does not decode.
pub fn decode_post(body: Value) -> Result<Post, PostsServiceError> {
    let record = unwrap_item(body).ok_or(PostsServiceError::NotFound)?;
    let post: Post = serde_json::from_value(record).map_err(PostsServiceError::InvalidRecord)?;

    if !post.is_published() {
        debug!(slug = %post.slug, "post is not published");

        return Err(PostsServiceError::NotFound);
    }

    Ok(post)
}

/// Decode a post list response, skipping malformed records.
///
/// # Errors
///
/// Returns [`PostsServiceError::UnexpectedResponse`] if the body is not a
/// list.
pub fn decode_post_list(body: Value) -> Result<Vec<Post>, PostsServiceError> {
    let records = unwrap_list(body).ok_or(PostsServiceError::UnexpectedResponse)?;

    let posts = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Post>(record) {
            Ok(post) => Some(post),
            Err(error) => {
                warn!(%error, "skipping malformed post record");

                None
            }
        })
        .collect();

    Ok(posts)
}
