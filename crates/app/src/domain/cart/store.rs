//! Cart store.
//!
//! Owns the single cart of a client session. Every mutation is applied to a
//! copy, persisted, swapped in and then broadcast, all under one lock, so
//! concurrent callers in the same process never lose each other's updates.

use std::{
    fmt::{self, Debug, Formatter},
    num::NonZeroU32,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use bistro::{
    cart::{Cart, CartError, CartLine, CartTotals, NewCartLine},
    products::{Product, ProductId},
};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use crate::domain::cart::{
    errors::CartStoreError,
    events::{CartChange, CartEvent, CartSummary},
    storage::{CART_SLOT, CartStorage},
};

/// Buffered events per subscriber before the slowest one starts lagging.
const EVENT_CAPACITY: usize = 64;

/// Persistent, observable cart.
pub struct CartStore {
    storage: Arc<dyn CartStorage>,
    cart: Mutex<Cart>,
    events: broadcast::Sender<CartEvent>,
}

impl CartStore {
    /// Open the store, restoring whatever cart the storage holds.
    ///
    /// Restoring never fails: unreadable or corrupt data yields an empty
    /// cart and a warning.
    pub fn open(storage: Arc<dyn CartStorage>) -> Self {
        let cart = restore(storage.as_ref());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        debug!(lines = cart.len(), "cart restored");

        Self {
            storage,
            cart: Mutex::new(cart),
            events,
        }
    }

    /// Snapshot of the current cart.
    pub fn get(&self) -> Cart {
        self.lock().clone()
    }

    /// Totals of the current cart.
    pub fn totals(&self) -> CartTotals {
        self.lock().totals()
    }

    /// Receive an event after every mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Add one unit of a product, returning its new quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the cart cannot be persisted.
    pub fn add(&self, line: NewCartLine) -> Result<NonZeroU32, CartStoreError> {
        let id = line.id;

        self.mutate(|cart| {
            let quantity = cart.add(line);

            Ok((quantity, CartChange::Added { id, quantity }))
        })
    }

    /// Add one unit of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the cart cannot be persisted.
    pub fn add_product(&self, product: &Product) -> Result<NonZeroU32, CartStoreError> {
        self.add(product.into())
    }

    /// Add one unit to an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::LineNotFound`] for an unknown product, or a
    /// storage error if the cart cannot be persisted.
    pub fn increment(&self, id: ProductId) -> Result<NonZeroU32, CartStoreError> {
        self.mutate(|cart| {
            let quantity = cart.increment(id)?;

            Ok((quantity, CartChange::QuantityChanged { id, quantity }))
        })
    }

    /// Remove one unit from an existing line, stopping at one.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::LineNotFound`] for an unknown product, or a
    /// storage error if the cart cannot be persisted.
    pub fn decrement(&self, id: ProductId) -> Result<NonZeroU32, CartStoreError> {
        self.mutate(|cart| {
            let quantity = cart.decrement(id)?;

            Ok((quantity, CartChange::QuantityChanged { id, quantity }))
        })
    }

    /// Replace the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::LineNotFound`] for an unknown product, or a
    /// storage error if the cart cannot be persisted.
    pub fn set_quantity(
        &self,
        id: ProductId,
        quantity: NonZeroU32,
    ) -> Result<NonZeroU32, CartStoreError> {
        self.mutate(|cart| {
            let quantity = cart.set_quantity(id, quantity)?;

            Ok((quantity, CartChange::QuantityChanged { id, quantity }))
        })
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::LineNotFound`] for an unknown product, or a
    /// storage error if the cart cannot be persisted.
    pub fn remove(&self, id: ProductId) -> Result<CartLine, CartStoreError> {
        self.mutate(|cart| {
            let line = cart.remove(id)?;

            Ok((line, CartChange::Removed { id }))
        })
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the cart cannot be persisted.
    pub fn clear(&self) -> Result<(), CartStoreError> {
        self.mutate(|cart| {
            cart.clear();

            Ok(((), CartChange::Cleared))
        })
    }

    /// Re-read the cart from storage after another process changed it.
    pub fn reload(&self) -> Cart {
        let mut guard = self.lock();

        *guard = restore(self.storage.as_ref());

        let snapshot = guard.clone();

        self.notify(CartEvent {
            change: CartChange::Reloaded,
            summary: CartSummary::from(&*guard),
        });

        drop(guard);

        info!(lines = snapshot.len(), "cart reloaded from storage");

        snapshot
    }

    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut Cart) -> Result<(T, CartChange), CartError>,
    ) -> Result<T, CartStoreError> {
        let mut guard = self.lock();
        let mut next = guard.clone();

        let (value, change) = apply(&mut next)?;

        self.persist(&next)?;

        *guard = next;

        self.notify(CartEvent {
            change,
            summary: CartSummary::from(&*guard),
        });

        Ok(value)
    }

    fn persist(&self, cart: &Cart) -> Result<(), CartStoreError> {
        if cart.is_empty() {
            self.storage.remove(CART_SLOT)?;

            return Ok(());
        }

        let encoded = serde_json::to_string(cart).map_err(CartStoreError::Encode)?;

        self.storage.write(CART_SLOT, &encoded)?;

        Ok(())
    }

    fn notify(&self, event: CartEvent) {
        let receivers = self.events.send(event).unwrap_or_default();

        trace!(change = ?event.change, receivers, "cart event sent");
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.lock())
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

/// Read the persisted cart, keeping every line that validates.
fn restore(storage: &dyn CartStorage) -> Cart {
    let raw = match storage.read(CART_SLOT) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(error) => {
            warn!(%error, "failed to read persisted cart, starting empty");

            return Cart::new();
        }
    };

    let records = match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(records) => records,
        Err(error) => {
            warn!(%error, "persisted cart is corrupt, starting empty");

            return Cart::new();
        }
    };

    let lines = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<CartLine>(record) {
            Ok(line) => Some(line),
            Err(error) => {
                warn!(index, %error, "rejected persisted cart line");

                None
            }
        });

    Cart::from_lines(lines)
}
