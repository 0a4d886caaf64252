//! Fixtures
//!
//! Menu data in YAML, used for offline browsing and tests.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::products::{Category, CategoryId, Product, ProductId};

const SAMPLE_MENU: &str = include_str!("../fixtures/menu.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// A menu of categories and products.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MenuFixture {
    /// Menu categories
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Products in menu order, including unavailable ones
    #[serde(default)]
    pub products: Vec<Product>,
}

impl MenuFixture {
    /// Parse a menu from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or a product fails to decode.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a menu from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Look up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Look up a category by id.
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }
}

/// The bundled sample menu.
///
/// # Errors
///
/// Returns an error if the bundled YAML fails to parse.
pub fn sample_menu() -> Result<MenuFixture, FixtureError> {
    MenuFixture::from_yaml(SAMPLE_MENU)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::prices::Price;

    #[test]
    fn sample_menu_parses_every_price_format() -> TestResult {
        let menu = sample_menu()?;

        let wagyu = menu.product(ProductId::new(201)).ok_or("missing wagyu")?;
        let salad = menu.product(ProductId::new(301)).ok_or("missing salad")?;
        let combo = menu.product(ProductId::new(602)).ok_or("missing combo")?;

        assert_eq!(wagyu.price, Price::from_units(1_250_000));
        assert_eq!(salad.price, Price::from_units(159_000));
        assert_eq!(combo.price, Price::from_units(1_590_000));

        Ok(())
    }

    #[test]
    fn sample_menu_keeps_unavailable_products() -> TestResult {
        let menu = sample_menu()?;

        let hidden = menu.product(ProductId::new(203)).ok_or("missing product")?;

        assert!(!hidden.is_available());
        assert_eq!(
            menu.category(CategoryId::new(6)).map(|category| category.name.as_str()),
            Some("Combo")
        );

        Ok(())
    }

    #[test]
    fn malformed_price_fails_to_load() {
        let yaml = "products:\n  - id: 1\n    name: Bad\n    price: free\n";

        let result = MenuFixture::from_yaml(yaml);

        assert!(
            matches!(result, Err(FixtureError::Yaml(_))),
            "expected Yaml error, got {result:?}"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = MenuFixture::from_path("does/not/exist.yml");

        assert!(
            matches!(result, Err(FixtureError::Io(_))),
            "expected Io error, got {result:?}"
        );
    }
}
