//! Products

use serde::{Deserialize, Serialize};

use crate::{ids::TypedId, prices::Price, serde_ext::flag};

/// Product Id
pub type ProductId = TypedId<Product>;

/// Category Id
pub type CategoryId = TypedId<Category>;

/// Category holding the combo deals shown above the menu.
pub const COMBO_CATEGORY: CategoryId = CategoryId::new(6);

/// Maximum number of combos shown in the combo section.
pub const COMBO_LIMIT: usize = 8;

/// Menu category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id
    pub id: CategoryId,

    /// Display name
    pub name: String,
}

/// Product as served by the ordering API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// URL slug for the product detail page
    #[serde(default)]
    pub slug: Option<String>,

    /// Unit price
    pub price: Price,

    /// Image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Long description
    #[serde(default)]
    pub description: Option<String>,

    /// Owning category
    #[serde(default, rename = "id_category")]
    pub category: Option<CategoryId>,

    /// Only products with a set status are offered to guests.
    #[serde(default, deserialize_with = "flag")]
    pub status: bool,
}

impl Product {
    /// Whether the product may be displayed.
    pub fn is_available(&self) -> bool {
        self.status
    }

    /// Whether the product belongs to `category`.
    pub fn in_category(&self, category: CategoryId) -> bool {
        self.category == Some(category)
    }

    /// Case-insensitive substring match over the name and description.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }
}

/// Keep only displayable products, preserving order.
pub fn available(products: impl IntoIterator<Item = Product>) -> Vec<Product> {
    products
        .into_iter()
        .filter(Product::is_available)
        .collect()
}

/// The unfiltered menu page: a combo strip followed by the full menu.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuSections {
    /// Leading combos from the combo category.
    pub combos: Vec<Product>,

    /// Every displayable product.
    pub menu: Vec<Product>,
}

impl MenuSections {
    /// Split a product list into menu sections.
    pub fn build(products: &[Product], combo_category: CategoryId, combo_limit: usize) -> Self {
        let menu: Vec<Product> = products
            .iter()
            .filter(|product| product.is_available())
            .cloned()
            .collect();

        let combos = menu
            .iter()
            .filter(|product| product.in_category(combo_category))
            .take(combo_limit)
            .cloned()
            .collect();

        Self { combos, menu }
    }
}
