//! Offline products service.

use async_trait::async_trait;
use bistro::{
    fixtures::MenuFixture,
    products::{CategoryId, Product},
    search::{ProductFilter, filter_products},
};

use crate::domain::products::{ProductsService, errors::ProductsServiceError};

/// Products served from a fixture menu instead of the ordering API.
#[derive(Debug, Clone)]
pub struct FixtureProductsService {
    products: Vec<Product>,
}

impl FixtureProductsService {
    /// Serve the products of `menu`.
    #[must_use]
    pub fn new(menu: MenuFixture) -> Self {
        Self {
            products: menu.products,
        }
    }
}

#[async_trait]
impl ProductsService for FixtureProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(filter_products(&self.products, &ProductFilter::All))
    }

    async fn list_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(filter_products(
            &self.products,
            &ProductFilter::Category(category),
        ))
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ProductsServiceError> {
        let query = query.trim();

        let filter = if query.is_empty() {
            ProductFilter::All
        } else {
            ProductFilter::Search(query.to_string())
        };

        Ok(filter_products(&self.products, &filter))
    }
}

#[cfg(test)]
mod tests {
    use bistro::fixtures::sample_menu;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn serves_sample_menu() -> TestResult {
        let service = FixtureProductsService::new(sample_menu()?);

        let all = service.list_products().await?;
        let combos = service.list_by_category(CategoryId::new(6)).await?;
        let found = service.search_products("  wagyu ").await?;
        let blank = service.search_products("   ").await?;

        assert_eq!(all.len(), 8);
        assert_eq!(combos.len(), 2);
        assert_eq!(found.len(), 1);
        assert_eq!(blank.len(), all.len());

        Ok(())
    }
}
