//! Cart Totals

use rust_decimal::Decimal;

use super::CartLine;

/// Derived totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: u64,

    /// Sum of unit price times quantity.
    pub amount: Decimal,

    /// Half of the amount, paid up front when booking a table.
    pub deposit: Decimal,
}

impl CartTotals {
    /// Compute totals over a set of lines.
    pub fn of(lines: &[CartLine]) -> Self {
        let (item_count, amount) =
            lines
                .iter()
                .fold((0_u64, Decimal::ZERO), |(count, amount), line| {
                    (
                        count.saturating_add(u64::from(line.quantity.get())),
                        amount.saturating_add(line.line_total()),
                    )
                });

        Self {
            item_count,
            amount,
            deposit: amount / Decimal::TWO,
        }
    }

    /// Whether the totals describe an empty cart.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use testresult::TestResult;

    use super::*;
    use crate::{prices::Price, products::ProductId};

    fn line(id: u64, price: Price, quantity: u32) -> Result<CartLine, &'static str> {
        Ok(CartLine {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            image: None,
            price,
            quantity: NonZeroU32::new(quantity).ok_or("quantity must be non-zero")?,
        })
    }

    #[test]
    fn empty_lines_have_zero_totals() {
        let totals = CartTotals::of(&[]);

        assert!(totals.is_empty());
        assert_eq!(totals.amount, Decimal::ZERO);
        assert_eq!(totals.deposit, Decimal::ZERO);
    }

    #[test]
    fn sums_quantities_and_amounts() -> TestResult {
        let lines = [
            line(1, Price::from_units(100_000), 2)?,
            line(2, Price::from_units(45_000), 3)?,
        ];

        let totals = CartTotals::of(&lines);

        assert_eq!(totals.item_count, 5);
        assert_eq!(totals.amount, Decimal::from(335_000));
        assert_eq!(totals.deposit, Decimal::from(167_500));

        Ok(())
    }

    #[test]
    fn deposit_keeps_odd_halves_exact() -> TestResult {
        let lines = [line(1, Price::from_units(25_001), 1)?];

        let totals = CartTotals::of(&lines);

        assert_eq!(totals.deposit, Decimal::new(125_005, 1));

        Ok(())
    }
}
