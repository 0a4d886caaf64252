//! Cart change notifications.

use std::num::NonZeroU32;

use bistro::{cart::Cart, products::ProductId};

/// What a mutation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A product was added, or its quantity bumped by an add.
    Added {
        /// Product id
        id: ProductId,

        /// Quantity after the add
        quantity: NonZeroU32,
    },

    /// A line's quantity was changed directly.
    QuantityChanged {
        /// Product id
        id: ProductId,

        /// New quantity
        quantity: NonZeroU32,
    },

    /// A line was removed.
    Removed {
        /// Product id
        id: ProductId,
    },

    /// Every line was removed.
    Cleared,

    /// The cart was re-read from storage after an outside write.
    Reloaded,
}

/// Cart state as seen right after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Whether any line remains.
    pub has_items: bool,

    /// Sum of quantities.
    pub item_count: u64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        let item_count = cart.totals().item_count;

        Self {
            has_items: item_count > 0,
            item_count,
        }
    }
}

/// Notification sent to cart subscribers after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEvent {
    /// The change that was applied.
    pub change: CartChange,

    /// Cart summary after the change.
    pub summary: CartSummary,
}
