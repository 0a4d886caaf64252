//! Products service.

use async_trait::async_trait;
use bistro::products::{CategoryId, Product};
use mockall::automock;
use tracing::{debug, instrument};

use crate::{
    domain::products::{errors::ProductsServiceError, records::decode_product_list},
    http::ApiClient,
};

/// Path and query of one product listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRequest {
    /// Path segments below the API base URL.
    pub segments: Vec<String>,

    /// Query parameters.
    pub query: Vec<(&'static str, String)>,
}

impl ProductRequest {
    /// Every product.
    pub fn all() -> Self {
        Self::at(&["users", "product"])
    }

    /// The products of one category.
    pub fn category(category: CategoryId) -> Self {
        Self::at(&["users", "products", "category", category.to_string().as_str()])
    }

    /// Products matching `text`. Blank text asks for every product.
    pub fn search(text: &str) -> Self {
        let text = text.trim();

        if text.is_empty() {
            return Self::all();
        }

        let mut request = Self::at(&["users", "product", "search"]);

        request.query.push(("query", text.to_string()));
        request
    }

    fn at(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(ToString::to_string).collect(),
            query: Vec::new(),
        }
    }
}

/// Products backed by the ordering API.
#[derive(Debug, Clone)]
pub struct HttpProductsService {
    client: ApiClient,
}

impl HttpProductsService {
    /// Create a service using `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, request: ProductRequest) -> Result<Vec<Product>, ProductsServiceError> {
        let body = self
            .client
            .get_json(&request.segments, &request.query)
            .await?;
        let products = decode_product_list(body)?;

        debug!(path = %request.segments.join("/"), count = products.len(), "products loaded");

        Ok(products)
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        self.fetch(ProductRequest::all()).await
    }

    #[instrument(skip(self))]
    async fn list_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        self.fetch(ProductRequest::category(category)).await
    }

    #[instrument(skip(self))]
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ProductsServiceError> {
        self.fetch(ProductRequest::search(query)).await
    }
}

/// Read access to the product catalog.
///
/// Every method returns only products that are on sale, in API order.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieves the products of one category.
    async fn list_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieves products matching a search text.
    ///
    /// The text is trimmed; an empty text lists all products.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::config::api::ApiConfig;

    fn client() -> Result<ApiClient, crate::http::ApiError> {
        ApiClient::new(&ApiConfig {
            base_url: "https://moobeefsteak.online/api".to_string(),
            timeout_secs: 5,
            retry_attempts: 1,
            retry_backoff_ms: 0,
        })
    }

    #[test]
    fn all_products_path() -> TestResult {
        let request = ProductRequest::all();

        assert_eq!(
            client()?.url(&request.segments).as_str(),
            "https://moobeefsteak.online/api/users/product"
        );
        assert!(request.query.is_empty());

        Ok(())
    }

    #[test]
    fn category_path_carries_the_id() -> TestResult {
        let request = ProductRequest::category(CategoryId::new(6));

        assert_eq!(
            client()?.url(&request.segments).as_str(),
            "https://moobeefsteak.online/api/users/products/category/6"
        );
        assert!(request.query.is_empty());

        Ok(())
    }

    #[test]
    fn search_sends_trimmed_query() -> TestResult {
        let request = ProductRequest::search("  bò wagyu ");

        assert_eq!(
            client()?.url(&request.segments).as_str(),
            "https://moobeefsteak.online/api/users/product/search"
        );
        assert_eq!(request.query, vec![("query", "bò wagyu".to_string())]);

        Ok(())
    }

    #[test]
    fn blank_search_lists_everything() {
        assert_eq!(ProductRequest::search("   "), ProductRequest::all());
        assert_eq!(ProductRequest::search(""), ProductRequest::all());
    }
}
