//! Prices
//!
//! Product prices reach the client in several shapes: JSON numbers, plain
//! decimal strings (`"150000.00"`) and display strings with thousands
//! grouping and a currency marker (`"100,000 đ"`). Every shape is validated
//! into a [`Price`] at the ingestion boundary. Malformed input is rejected
//! with a [`PriceError`] and is never coerced to zero.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};
use thiserror::Error;

/// Currency markers accepted around a price string.
const CURRENCY_MARKERS: [&str; 5] = ["VND", "vnd", "đ", "Đ", "₫"];

/// Errors raised while validating a price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The price was an empty string.
    #[error("price is empty")]
    Empty,

    /// The price parsed but was below zero.
    #[error("price must not be negative, got {0}")]
    Negative(String),

    /// The price could not be read as a number.
    #[error("malformed price {0:?}")]
    Malformed(String),
}

/// A validated, non-negative unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] when `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount.to_string()));
        }

        Ok(Self(amount.normalize()))
    }

    /// Create a price from whole currency units.
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Parse a price from its external string representation.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] when the string is empty, negative or not a
    /// recognised number format.
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let trimmed = strip_currency(raw);

        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        if trimmed.starts_with('-') {
            return Err(PriceError::Negative(raw.trim().to_string()));
        }

        let digits =
            grouped_integer(trimmed).or_else(|| plain_decimal(trimmed).map(str::to_string));

        let amount = digits
            .and_then(|digits| Decimal::from_str(&digits).ok())
            .ok_or_else(|| PriceError::Malformed(raw.to_string()))?;

        Self::new(amount)
    }

    /// Create a price from a JSON floating point number.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] when the number is negative or not finite.
    pub fn from_f64(value: f64) -> Result<Self, PriceError> {
        let amount =
            Decimal::from_f64(value).ok_or_else(|| PriceError::Malformed(value.to_string()))?;

        Self::new(amount)
    }

    /// The decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount as Vietnamese dong, or `None` if it does not fit.
    pub fn to_money(&self) -> Option<Money<'static, Currency>> {
        to_vnd(self.0)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Wrap a decimal amount as Vietnamese dong, rounded to whole dong.
///
/// Returns `None` when the amount does not fit in the minor unit range.
pub fn to_vnd(amount: Decimal) -> Option<Money<'static, Currency>> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(|units| Money::from_minor(units, iso::VND))
}

/// Format an amount as Vietnamese dong for display.
pub fn format_vnd(amount: Decimal) -> String {
    to_vnd(amount).map_or_else(|| format!("{amount} VND"), |money| format!("{money}"))
}

fn strip_currency(raw: &str) -> &str {
    let mut value = raw.trim();

    for marker in CURRENCY_MARKERS {
        if let Some(rest) = value.strip_suffix(marker) {
            value = rest.trim_end();
            break;
        }
    }

    for marker in CURRENCY_MARKERS {
        if let Some(rest) = value.strip_prefix(marker) {
            value = rest.trim_start();
            break;
        }
    }

    value
}

/// `"100,000"` or `"1.250.000"`: one separator kind, groups of three digits.
fn grouped_integer(value: &str) -> Option<String> {
    let separator = value.chars().find(|c| !c.is_ascii_digit())?;

    if separator != ',' && separator != '.' {
        return None;
    }

    let mut groups = value.split(separator);

    let head = groups.next()?;

    if head.is_empty() || head.len() > 3 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = head.to_string();
    let mut tail_groups = 0_usize;

    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        digits.push_str(group);
        tail_groups += 1;
    }

    (tail_groups > 0).then_some(digits)
}

/// `"150000"` or `"150000.50"`.
fn plain_decimal(value: &str) -> Option<&str> {
    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    let valid = match value.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => is_digits(value),
    };

    valid.then_some(value)
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract().is_zero() {
            if let Some(units) = self.0.to_u64() {
                return serializer.serialize_u64(units);
            }
        }

        match self.0.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&self.0.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative price as a number or string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Price::from_units(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Price::new(Decimal::from(value)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Price::from_f64(value).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Price::parse(value).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_comma_grouped_thousands() -> TestResult {
        assert_eq!(Price::parse("100,000")?, Price::from_units(100_000));

        Ok(())
    }

    #[test]
    fn parses_dot_grouped_thousands_with_currency() -> TestResult {
        assert_eq!(Price::parse("1.250.000 đ")?, Price::from_units(1_250_000));
        assert_eq!(Price::parse("₫ 45,000")?, Price::from_units(45_000));
        assert_eq!(Price::parse("89,000VND")?, Price::from_units(89_000));

        Ok(())
    }

    #[test]
    fn parses_plain_decimal_strings() -> TestResult {
        assert_eq!(Price::parse("150000.00")?, Price::from_units(150_000));
        assert_eq!(Price::parse(" 99.5 ")?.amount(), Decimal::new(995, 1));

        Ok(())
    }

    #[test]
    fn rejects_empty_strings() {
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert_eq!(Price::parse("đ"), Err(PriceError::Empty));
    }

    #[test]
    fn rejects_negative_values() {
        assert!(matches!(Price::parse("-5"), Err(PriceError::Negative(_))));
        assert!(matches!(
            Price::new(Decimal::NEGATIVE_ONE),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn rejects_malformed_strings() {
        for raw in ["abc", "1,5", "12,34,567", "1.000,50", "10..0", "1 000"] {
            assert!(
                matches!(Price::parse(raw), Err(PriceError::Malformed(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn deserializes_numbers_and_strings() -> TestResult {
        let prices: Vec<Price> = serde_json::from_str(r#"[100000, 12.5, "100,000"]"#)?;

        assert_eq!(
            prices,
            vec![
                Price::from_units(100_000),
                Price::new(Decimal::new(125, 1))?,
                Price::from_units(100_000),
            ]
        );

        Ok(())
    }

    #[test]
    fn deserializing_garbage_fails() {
        let result: Result<Price, _> = serde_json::from_str(r#""free""#);

        assert!(result.is_err());
    }

    #[test]
    fn serializes_whole_amounts_as_integers() -> TestResult {
        assert_eq!(serde_json::to_string(&Price::from_units(100_000))?, "100000");
        assert_eq!(serde_json::to_string(&Price::new(Decimal::new(125, 1))?)?, "12.5");

        Ok(())
    }
}
