//! Posts service.

use async_trait::async_trait;
use bistro::posts::{Post, RECENT_POSTS_PAGE_SIZE, RELATED_POSTS_LIMIT, related_posts};
use mockall::automock;
use tracing::{instrument, warn};

use crate::{
    domain::posts::{
        errors::PostsServiceError,
        records::{decode_post, decode_post_list},
    },
    http::ApiClient,
};

/// Path segments of one post.
pub fn post_segments(slug: &str) -> [&str; 3] {
    ["user", "posts", slug.trim()]
}

/// Query for the newest `limit` posts.
pub fn recent_posts_query(limit: usize) -> [(&'static str, String); 2] {
    [
        ("sort", "-created_at".to_string()),
        ("per_page", limit.to_string()),
    ]
}

/// Posts backed by the ordering API.
#[derive(Debug, Clone)]
pub struct HttpPostsService {
    client: ApiClient,
}

impl HttpPostsService {
    /// Create a service using `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PostsService for HttpPostsService {
    #[instrument(skip(self))]
    async fn get_post(&self, slug: &str) -> Result<Post, PostsServiceError> {
        let body = self.client.get_json(&post_segments(slug), &[]).await?;

        decode_post(body)
    }

    #[instrument(skip(self))]
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, PostsServiceError> {
        let body = self
            .client
            .get_json(&["user", "posts"], &recent_posts_query(limit))
            .await?;

        decode_post_list(body)
    }
}

/// Read access to news posts.
#[automock]
#[async_trait]
pub trait PostsService: Send + Sync {
    /// Retrieve a published post by slug.
    ///
    /// Missing and unpublished posts are both [`PostsServiceError::NotFound`].
    async fn get_post(&self, slug: &str) -> Result<Post, PostsServiceError>;

    /// Retrieve the newest posts, newest first.
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, PostsServiceError>;
}

/// A post together with the posts listed beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// The post being read.
    pub post: Post,

    /// Up to three other recent posts.
    pub related: Vec<Post>,
}

/// Load a post and its related posts.
///
/// A failure to load related posts leaves the list empty.
///
/// # Errors
///
/// Returns [`PostsServiceError::NotFound`] for a missing or unpublished post,
/// or the underlying error if the post itself cannot be loaded.
pub async fn load_article(
    service: &dyn PostsService,
    slug: &str,
) -> Result<Article, PostsServiceError> {
    let post = service.get_post(slug).await?;

    let related = match service.recent_posts(RECENT_POSTS_PAGE_SIZE).await {
        Ok(recent) => related_posts(post.id, recent, RELATED_POSTS_LIMIT),
        Err(error) => {
            warn!(%error, slug, "failed to load related posts");

            Vec::new()
        }
    };

    Ok(Article { post, related })
}
