//! News Posts

use jiff::civil::DateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::{
    ids::TypedId,
    serde_ext::{flag, optional_datetime},
    vouchers::{Voucher, VoucherId},
};

/// Post Id
pub type PostId = TypedId<Post>;

/// Author Id
pub type AuthorId = TypedId<Author>;

/// Number of related posts shown under an article.
pub const RELATED_POSTS_LIMIT: usize = 3;

/// Page size used when fetching recent posts for the related list.
///
/// One more than [`RELATED_POSTS_LIMIT`] so the current post can be dropped.
pub const RECENT_POSTS_PAGE_SIZE: usize = RELATED_POSTS_LIMIT + 1;

/// Post author
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    /// Author id
    pub id: AuthorId,

    /// Display name
    pub name: String,

    /// Contact address
    #[serde(default)]
    pub email: Option<String>,

    /// Avatar URL
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// News post
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    /// Post id
    pub id: PostId,

    /// Headline
    pub title: String,

    /// URL slug
    pub slug: String,

    /// Summary
    #[serde(default)]
    pub description: Option<String>,

    /// HTML body
    #[serde(default)]
    pub content: Option<String>,

    /// Cover image URL
    #[serde(default)]
    pub image: Option<String>,

    /// View counter
    #[serde(default)]
    pub views: u64,

    /// Featured on the home page
    #[serde(default, deserialize_with = "flag")]
    pub outstanding: bool,

    /// Published
    #[serde(default, deserialize_with = "flag")]
    pub status: bool,

    /// Creation time
    #[serde(default, deserialize_with = "optional_datetime")]
    pub created_at: Option<DateTime>,

    /// Last edit time
    #[serde(default, deserialize_with = "optional_datetime")]
    pub updated_at: Option<DateTime>,

    /// Id of the attached voucher
    #[serde(default)]
    pub id_voucher: Option<VoucherId>,

    /// Attached voucher; one that fails to decode is dropped
    #[serde(default, deserialize_with = "lenient_voucher")]
    pub voucher: Option<Voucher>,

    /// Estimated reading time in minutes
    #[serde(default)]
    pub reading_time: Option<u32>,

    /// Author
    #[serde(default, rename = "user")]
    pub author: Option<Author>,
}

impl Post {
    /// Whether the post may be shown to guests.
    pub fn is_published(&self) -> bool {
        self.status
    }

    /// The attached voucher, when one is linked and switched on.
    pub fn active_voucher(&self) -> Option<&Voucher> {
        self.id_voucher?;

        self.voucher.as_ref().filter(|voucher| voucher.is_active())
    }
}

/// Pick posts to show under `current`.
///
/// Drops `current` and unpublished posts, keeps input order and returns at
/// most `limit` posts.
pub fn related_posts(current: PostId, recent: Vec<Post>, limit: usize) -> Vec<Post> {
    recent
        .into_iter()
        .filter(|post| post.id != current && post.is_published())
        .take(limit)
        .collect()
}

fn lenient_voucher<'de, D>(deserializer: D) -> Result<Option<Voucher>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match serde_json::from_value(raw) {
        Ok(voucher) => Ok(Some(voucher)),
        Err(error) => {
            warn!(%error, "dropping malformed voucher");

            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    fn post_json(id: u64, status: bool) -> Value {
        json!({
            "id": id,
            "title": format!("Post {id}"),
            "slug": format!("post-{id}"),
            "status": status,
            "created_at": "2025-03-01T08:00:00.000000Z",
        })
    }

    fn post(id: u64, status: bool) -> Result<Post, serde_json::Error> {
        serde_json::from_value(post_json(id, status))
    }

    #[test]
    fn decodes_minimal_post() -> TestResult {
        let post = post(1, true)?;

        assert!(post.is_published());
        assert_eq!(post.views, 0);
        assert!(post.created_at.is_some(), "expected creation time");
        assert_eq!(post.active_voucher(), None);

        Ok(())
    }

    #[test]
    fn active_voucher_requires_link_and_status() -> TestResult {
        let mut raw = post_json(1, true);

        raw["voucher"] = json!({
            "id": 4,
            "name": "Giảm 10%",
            "code": "NEWS10",
            "discount_type": 1,
            "discount_value": 10,
            "status": true,
            "start_date": null,
            "end_date": null,
        });

        let unlinked: Post = serde_json::from_value(raw.clone())?;

        assert_eq!(unlinked.active_voucher(), None);

        raw["id_voucher"] = json!(4);

        let linked: Post = serde_json::from_value(raw.clone())?;
        let voucher = linked.active_voucher().ok_or("expected active voucher")?;

        assert_eq!(voucher.code, "NEWS10");

        raw["voucher"]["status"] = json!(false);

        let disabled: Post = serde_json::from_value(raw)?;

        assert_eq!(disabled.active_voucher(), None);

        Ok(())
    }

    #[test]
    fn malformed_voucher_does_not_fail_the_post() -> TestResult {
        let mut raw = post_json(7, true);

        raw["id_voucher"] = Value::Null;
        raw["voucher"] = json!({
            "id": 1,
            "discount_type": 3,
            "discount_value": 10,
            "status": false,
        });

        let post: Post = serde_json::from_value(raw.clone())?;

        assert_eq!(post.id, PostId::new(7));
        assert_eq!(post.voucher, None);

        raw["id_voucher"] = json!(1);
        raw["voucher"]["discount_type"] = json!(1);
        raw["voucher"]["discount_value"] = json!(150);
        raw["voucher"]["status"] = json!(true);

        let linked: Post = serde_json::from_value(raw)?;

        assert!(linked.is_published());
        assert_eq!(linked.active_voucher(), None);

        Ok(())
    }

    #[test]
    fn related_posts_skip_current_and_unpublished() -> TestResult {
        let recent = vec![post(5, true)?, post(4, true)?, post(3, false)?, post(2, true)?];

        let related = related_posts(PostId::new(4), recent, RELATED_POSTS_LIMIT);
        let ids: Vec<u64> = related.iter().map(|post| post.id.get()).collect();

        assert_eq!(ids, vec![5, 2]);

        Ok(())
    }

    #[test]
    fn related_posts_respect_limit() -> TestResult {
        let recent = vec![post(5, true)?, post(4, true)?, post(3, true)?, post(2, true)?];

        let related = related_posts(PostId::new(1), recent, RELATED_POSTS_LIMIT);

        assert_eq!(related.len(), 3);

        Ok(())
    }
}
