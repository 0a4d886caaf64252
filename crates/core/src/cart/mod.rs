//! Cart
//!
//! An ordered list of [`CartLine`]s, unique by product id. The product id is
//! the only identity key: two products that share a name are distinct lines.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

pub mod receipt;
pub mod totals;

pub use receipt::{CartReceipt, ReceiptError};
pub use totals::CartTotals;

/// Errors related to cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// No line exists for the product.
    #[error("product {0} is not in the cart")]
    LineNotFound(ProductId),
}

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id
    pub id: ProductId,

    /// Product name, copied when the product was added.
    pub name: String,

    /// Product image, copied when the product was added.
    #[serde(default)]
    pub image: Option<String>,

    /// Unit price, copied when the product was added.
    pub price: Price,

    /// Quantity, never below one.
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Decimal {
        self.price
            .amount()
            .saturating_mul(Decimal::from(self.quantity.get()))
    }
}

/// A product about to be added to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product image
    pub image: Option<String>,

    /// Validated unit price
    pub price: Price,
}

impl From<&Product> for NewCartLine {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
        }
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    index: FxHashMap<ProductId, usize>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing lines.
    ///
    /// Lines sharing a product id are merged into the first occurrence by
    /// summing their quantities.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines {
            match cart.position(line.id) {
                Some(position) => {
                    if let Some(existing) = cart.lines.get_mut(position) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity.get());
                    }
                }
                None => cart.push(line),
            }
        }

        cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Look up the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.position(id).and_then(|position| self.lines.get(position))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a product.
    ///
    /// An existing line gains one unit and keeps its original price;
    /// otherwise a new line with quantity one is appended. Returns the
    /// resulting quantity.
    pub fn add(&mut self, line: NewCartLine) -> NonZeroU32 {
        if let Some(existing) = self
            .position(line.id)
            .and_then(|position| self.lines.get_mut(position))
        {
            existing.quantity = existing.quantity.saturating_add(1);

            return existing.quantity;
        }

        self.push(CartLine {
            id: line.id,
            name: line.name,
            image: line.image,
            price: line.price,
            quantity: NonZeroU32::MIN,
        });

        NonZeroU32::MIN
    }

    /// Add one unit to an existing line. There is no upper bound beyond
    /// `u32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn increment(&mut self, id: ProductId) -> Result<NonZeroU32, CartError> {
        let line = self.line_mut(id)?;

        line.quantity = line.quantity.saturating_add(1);

        Ok(line.quantity)
    }

    /// Remove one unit from an existing line, stopping at one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn decrement(&mut self, id: ProductId) -> Result<NonZeroU32, CartError> {
        let line = self.line_mut(id)?;

        line.quantity = NonZeroU32::new(line.quantity.get() - 1).unwrap_or(NonZeroU32::MIN);

        Ok(line.quantity)
    }

    /// Replace the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn set_quantity(
        &mut self,
        id: ProductId,
        quantity: NonZeroU32,
    ) -> Result<NonZeroU32, CartError> {
        let line = self.line_mut(id)?;

        line.quantity = quantity;

        Ok(line.quantity)
    }

    /// Remove a line entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn remove(&mut self, id: ProductId) -> Result<CartLine, CartError> {
        let position = self.position(id).ok_or(CartError::LineNotFound(id))?;

        if position >= self.lines.len() {
            return Err(CartError::LineNotFound(id));
        }

        let removed = self.lines.remove(position);

        self.reindex();

        Ok(removed)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.index.clear();
    }

    /// Item count, amount and deposit for the current lines.
    pub fn totals(&self) -> CartTotals {
        CartTotals::of(&self.lines)
    }

    /// Consume the cart, returning its lines.
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn line_mut(&mut self, id: ProductId) -> Result<&mut CartLine, CartError> {
        let position = self.position(id).ok_or(CartError::LineNotFound(id))?;

        self.lines
            .get_mut(position)
            .ok_or(CartError::LineNotFound(id))
    }

    fn push(&mut self, line: CartLine) {
        self.index.insert(line.id, self.lines.len());
        self.lines.push(line);
    }

    fn reindex(&mut self) {
        self.index = self
            .lines
            .iter()
            .enumerate()
            .map(|(position, line)| (line.id, position))
            .collect();
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.lines)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartLine>::deserialize(deserializer).map(Self::from_lines)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn wagyu() -> NewCartLine {
        NewCartLine {
            id: ProductId::new(1),
            name: "Bò Wagyu".to_string(),
            image: None,
            price: Price::from_units(100_000),
        }
    }

    fn salad() -> NewCartLine {
        NewCartLine {
            id: ProductId::new(2),
            name: "Salad".to_string(),
            image: Some("salad.png".to_string()),
            price: Price::from_units(45_000),
        }
    }

    #[test]
    fn add_appends_new_line_with_quantity_one() {
        let mut cart = Cart::new();

        let quantity = cart.add(wagyu());

        assert_eq!(quantity.get(), 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.get(ProductId::new(1)).map(|line| line.price),
            Some(Price::from_units(100_000))
        );
    }

    #[test]
    fn add_existing_increments_and_keeps_price() {
        let mut cart = Cart::new();

        cart.add(wagyu());

        let mut repriced = wagyu();
        repriced.price = Price::from_units(1);

        let quantity = cart.add(repriced);

        assert_eq!(quantity.get(), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.get(ProductId::new(1)).map(|line| line.price),
            Some(Price::from_units(100_000))
        );
    }

    #[test]
    fn lines_are_keyed_by_id_not_name() {
        let mut cart = Cart::new();

        let mut twin = salad();
        twin.name = "Bò Wagyu".to_string();

        cart.add(wagyu());
        cart.add(twin);

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn decrement_floors_at_one() -> TestResult {
        let mut cart = Cart::new();
        let id = ProductId::new(1);

        cart.add(wagyu());
        cart.add(wagyu());

        assert_eq!(cart.decrement(id)?.get(), 1);
        assert_eq!(cart.decrement(id)?.get(), 1);
        assert_eq!(cart.get(id).map(|line| line.quantity.get()), Some(1));

        Ok(())
    }

    #[test]
    fn increment_unknown_line_errors() {
        let mut cart = Cart::new();

        let result = cart.increment(ProductId::new(9));

        assert_eq!(result, Err(CartError::LineNotFound(ProductId::new(9))));
    }

    #[test]
    fn set_quantity_replaces_quantity() -> TestResult {
        let mut cart = Cart::new();

        cart.add(salad());

        let quantity = NonZeroU32::new(5).ok_or("non-zero")?;

        assert_eq!(cart.set_quantity(ProductId::new(2), quantity)?, quantity);

        Ok(())
    }

    #[test]
    fn remove_keeps_remaining_lines_addressable() -> TestResult {
        let mut cart = Cart::new();

        cart.add(wagyu());
        cart.add(salad());

        let removed = cart.remove(ProductId::new(1))?;

        assert_eq!(removed.name, "Bò Wagyu");
        assert_eq!(cart.increment(ProductId::new(2))?.get(), 2);
        assert!(cart.get(ProductId::new(1)).is_none());

        Ok(())
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();

        cart.add(wagyu());
        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.get(ProductId::new(1)).is_none());
    }

    #[test]
    fn from_lines_merges_duplicate_ids() -> TestResult {
        let cart: Cart = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Bò Wagyu", "price": 100000, "quantity": 2},
                {"id": 2, "name": "Salad", "price": "45,000", "quantity": 1},
                {"id": 1, "name": "Bò Wagyu", "price": 100000, "quantity": 3}
            ]"#,
        )?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ProductId::new(1)).map(|l| l.quantity.get()), Some(5));

        Ok(())
    }

    #[test]
    fn zero_quantity_lines_fail_to_deserialize() {
        let result: Result<Cart, _> =
            serde_json::from_str(r#"[{"id": 1, "name": "A", "price": 1, "quantity": 0}]"#);

        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_array_with_numeric_prices() -> TestResult {
        let mut cart = Cart::new();

        cart.add(wagyu());

        let json = serde_json::to_value(&cart)?;

        assert_eq!(
            json,
            serde_json::json!([
                {"id": 1, "name": "Bò Wagyu", "image": null, "price": 100000, "quantity": 1}
            ])
        );

        Ok(())
    }
}
