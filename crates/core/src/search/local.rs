//! In-memory filtering over a previously fetched product list.

use crate::{products::Product, search::ProductFilter};

/// Apply a filter to a product list, keeping only displayable products.
pub fn filter_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    let needle = match filter {
        ProductFilter::Search(text) => Some(text.trim().to_lowercase()),
        ProductFilter::All | ProductFilter::Category(_) => None,
    };

    products
        .iter()
        .filter(|product| product.is_available())
        .filter(|product| match filter {
            ProductFilter::All => true,
            ProductFilter::Search(_) => needle
                .as_deref()
                .is_none_or(|needle| product.matches_text(needle)),
            ProductFilter::Category(category) => product.in_category(*category),
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        prices::Price,
        products::{CategoryId, ProductId},
    };

    fn catalog() -> Vec<Product> {
        [
            (1, "Bò Wagyu", Some("Thăn bò"), 2, true),
            (2, "Bò lúc lắc", None, 2, false),
            (3, "Salad cá hồi", Some("Cá hồi Na Uy"), 3, true),
            (4, "Combo gia đình", Some("Bò và salad"), 6, true),
        ]
        .into_iter()
        .map(|(id, name, description, category, status)| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            slug: None,
            price: Price::from_units(100_000),
            image: None,
            description: description.map(str::to_string),
            category: Some(CategoryId::new(category)),
            status,
        })
        .collect()
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|product| product.id.get()).collect()
    }

    #[test]
    fn all_keeps_available_products() {
        let shown = filter_products(&catalog(), &ProductFilter::All);

        assert_eq!(ids(&shown), vec![1, 3, 4]);
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let shown = filter_products(&catalog(), &ProductFilter::Search(" BÒ ".to_string()));

        assert_eq!(ids(&shown), vec![1, 4]);
    }

    #[test]
    fn category_matches_exact_id() {
        let shown = filter_products(&catalog(), &ProductFilter::Category(CategoryId::new(3)));

        assert_eq!(ids(&shown), vec![3]);
    }

    #[test]
    fn unmatched_search_is_empty() {
        let shown = filter_products(&catalog(), &ProductFilter::Search("pizza".to_string()));

        assert!(shown.is_empty());
    }
}
