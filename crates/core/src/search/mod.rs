//! Search & Filter
//!
//! The menu is narrowed either by a search text or by a category, never both.
//! [`SearchFilterState`] enforces that exclusivity and resolves the current
//! [`ProductFilter`]; [`Debouncer`] delays search text until typing pauses.

use std::fmt::{self, Display, Formatter};

use crate::products::CategoryId;

pub mod debounce;
pub mod local;

pub use debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
pub use local::filter_products;

/// The filter that currently drives the product list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ProductFilter {
    /// Every displayable product.
    #[default]
    All,

    /// Products matching a trimmed, non-empty search text.
    Search(String),

    /// Products in one category.
    Category(CategoryId),
}

impl ProductFilter {
    /// The loading phase shown while this filter is being applied.
    pub fn loading_phase(&self) -> LoadingPhase {
        match self {
            Self::All => LoadingPhase::LoadingAll,
            Self::Search(_) => LoadingPhase::Searching,
            Self::Category(_) => LoadingPhase::LoadingCategory,
        }
    }
}

impl Display for ProductFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all products"),
            Self::Search(text) => write!(f, "search {text:?}"),
            Self::Category(id) => write!(f, "category {id}"),
        }
    }
}

/// Transitional state shown while a product list is loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadingPhase {
    /// A search query is running.
    Searching,

    /// A category is loading.
    LoadingCategory,

    /// The full menu is loading.
    LoadingAll,
}

impl LoadingPhase {
    /// User-facing message.
    pub fn message(self) -> &'static str {
        match self {
            Self::Searching => "Searching...",
            Self::LoadingCategory => "Loading category...",
            Self::LoadingAll => "Loading products...",
        }
    }
}

/// Search text and category selection for a menu page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilterState {
    raw: String,
    debounced: String,
    category: Option<CategoryId>,
}

impl SearchFilterState {
    /// Create an unfiltered state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text as typed, updated on every keystroke.
    pub fn raw_search(&self) -> &str {
        &self.raw
    }

    /// Text as of the last quiet period.
    pub fn debounced_search(&self) -> &str {
        &self.debounced
    }

    /// Selected category, if any.
    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Record a keystroke. Searching deselects any category.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.raw = text.into();
        self.category = None;
    }

    /// Commit debounced text once typing has paused.
    pub fn commit_search(&mut self, text: impl Into<String>) {
        self.debounced = text.into();
    }

    /// Select or deselect a category. Selecting clears all search text.
    pub fn select_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
        self.raw.clear();
        self.debounced.clear();
    }

    /// Resolve the filter that drives the product list.
    pub fn filter(&self) -> ProductFilter {
        let search = self.debounced.trim();

        if !search.is_empty() {
            return ProductFilter::Search(search.to_string());
        }

        self.category
            .map_or(ProductFilter::All, ProductFilter::Category)
    }
}
