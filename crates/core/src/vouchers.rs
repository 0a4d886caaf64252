//! Vouchers
//!
//! Discount vouchers attached to news posts.

use decimal_percentage::Percentage;
use jiff::civil::DateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    ids::TypedId,
    prices::{Price, format_vnd},
    serde_ext::{flag, optional_datetime},
};

/// Voucher Id
pub type VoucherId = TypedId<Voucher>;

/// Wire code for a percentage discount.
pub const PERCENTAGE_DISCOUNT: u8 = 1;

/// Wire code for a fixed amount discount.
pub const FIXED_AMOUNT_DISCOUNT: u8 = 2;

/// Errors that can occur while reading a voucher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoucherError {
    /// The discount type code is not recognised.
    #[error("unknown discount type {0}")]
    UnknownDiscountType(u8),

    /// A percentage discount outside 0..=100.
    #[error("percentage discount {0} is out of range")]
    PercentageOutOfRange(Decimal),
}

/// How a voucher reduces an amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoucherDiscount {
    /// A fraction of the amount.
    Percentage(Percentage),

    /// A fixed amount off.
    FixedAmount(Price),
}

impl VoucherDiscount {
    /// Decode a discount from its wire type code and value.
    ///
    /// Percentage values are whole percents, so `10` means 10%.
    ///
    /// # Errors
    ///
    /// Returns a [`VoucherError`] for an unknown type code or a percentage
    /// above 100.
    pub fn from_wire(discount_type: u8, value: Price) -> Result<Self, VoucherError> {
        match discount_type {
            PERCENTAGE_DISCOUNT => {
                let percent = value.amount();

                if percent > Decimal::ONE_HUNDRED {
                    return Err(VoucherError::PercentageOutOfRange(percent));
                }

                Ok(Self::Percentage(Percentage::from(
                    percent / Decimal::ONE_HUNDRED,
                )))
            }
            FIXED_AMOUNT_DISCOUNT => Ok(Self::FixedAmount(value)),
            other => Err(VoucherError::UnknownDiscountType(other)),
        }
    }

    /// Amount taken off `amount`, never more than `amount` itself.
    pub fn discount_for(&self, amount: Decimal) -> Decimal {
        let raw = match self {
            Self::Percentage(percent) => *percent * amount,
            Self::FixedAmount(value) => value.amount(),
        };

        raw.min(amount).max(Decimal::ZERO)
    }

    /// Short label such as `10%` or `50.000 ₫`.
    pub fn describe(&self) -> String {
        match self {
            Self::Percentage(percent) => {
                let whole = (*percent * Decimal::ONE_HUNDRED).normalize();

                format!("{whole}%")
            }
            Self::FixedAmount(value) => format_vnd(value.amount()),
        }
    }
}

/// Voucher
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "VoucherRecord")]
pub struct Voucher {
    /// Voucher id
    pub id: VoucherId,

    /// Display name
    pub name: String,

    /// Code the guest redeems
    pub code: String,

    /// Discount granted
    pub discount: VoucherDiscount,

    /// Whether the voucher is switched on
    pub status: bool,

    /// First moment the voucher may be redeemed
    pub start_date: Option<DateTime>,

    /// Last moment the voucher may be redeemed
    pub end_date: Option<DateTime>,
}

impl Voucher {
    /// Whether the voucher is switched on.
    pub fn is_active(&self) -> bool {
        self.status
    }

    /// Whether the voucher is active and `now` falls inside its window.
    pub fn is_redeemable_at(&self, now: DateTime) -> bool {
        self.status
            && self.start_date.is_none_or(|start| start <= now)
            && self.end_date.is_none_or(|end| now <= end)
    }

    /// Amount taken off `amount`.
    pub fn discount_for(&self, amount: Decimal) -> Decimal {
        self.discount.discount_for(amount)
    }

    /// `amount` after the discount.
    pub fn apply_to(&self, amount: Decimal) -> Decimal {
        amount - self.discount_for(amount)
    }

    /// Short label for the discount.
    pub fn describe(&self) -> String {
        self.discount.describe()
    }
}

#[derive(Debug, Deserialize)]
struct VoucherRecord {
    id: VoucherId,

    #[serde(default)]
    name: String,

    #[serde(default)]
    code: String,

    discount_type: u8,

    discount_value: Price,

    #[serde(default, deserialize_with = "flag")]
    status: bool,

    #[serde(default, deserialize_with = "optional_datetime")]
    start_date: Option<DateTime>,

    #[serde(default, deserialize_with = "optional_datetime")]
    end_date: Option<DateTime>,
}

impl TryFrom<VoucherRecord> for Voucher {
    type Error = VoucherError;

    fn try_from(record: VoucherRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            name: record.name,
            code: record.code,
            discount: VoucherDiscount::from_wire(record.discount_type, record.discount_value)?,
            status: record.status,
            start_date: record.start_date,
            end_date: record.end_date,
        })
    }
}
