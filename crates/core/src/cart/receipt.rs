//! Cart Receipt
//!
//! Renders a cart as a terminal table followed by its totals.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::Columns, object::Rows},
};
use thiserror::Error;

use crate::{cart::Cart, prices::format_vnd};

/// Errors that can occur while writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// Cart receipt
#[derive(Debug, Clone, Copy)]
pub struct CartReceipt<'a> {
    cart: &'a Cart,
}

impl<'a> CartReceipt<'a> {
    /// Create a receipt for a cart.
    pub fn new(cart: &'a Cart) -> Self {
        Self { cart }
    }

    /// Write the receipt table and summary.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.cart.is_empty() {
            writeln!(out, "Your cart is empty.")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Unit Price", "Qty", "Total"]);

        for (idx, line) in self.cart.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                format_vnd(line.price.amount()),
                line.quantity.to_string(),
                format_vnd(line.line_total()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}")?;

        let totals = self.cart.totals();

        writeln!(out, " Items:   {}", totals.item_count)?;
        writeln!(out, " Total:   {}", format_vnd(totals.amount))?;
        writeln!(out, " Deposit: {}", format_vnd(totals.deposit))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{cart::NewCartLine, prices::Price, products::ProductId};

    #[test]
    fn empty_cart_writes_notice() -> TestResult {
        let cart = Cart::new();
        let mut out = Vec::new();

        CartReceipt::new(&cart).write_to(&mut out)?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn writes_lines_and_totals() -> TestResult {
        let mut cart = Cart::new();

        cart.add(NewCartLine {
            id: ProductId::new(1),
            name: "Bò Wagyu".to_string(),
            image: None,
            price: Price::from_units(100_000),
        });

        let mut out = Vec::new();

        CartReceipt::new(&cart).write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Bò Wagyu"), "missing item name in {text}");
        assert!(text.contains("Items:   1"), "missing item count in {text}");
        assert!(text.contains("Deposit:"), "missing deposit in {text}");

        Ok(())
    }
}
