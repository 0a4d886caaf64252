//! Booking store.

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use bistro::booking::{BookingInfo, TableIds};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::cart::{BOOKING_SLOT, CartStorage, StorageError};

/// Errors raised while saving booking state.
#[derive(Debug, Error)]
pub enum BookingStoreError {
    /// The booking could not be encoded.
    #[error("failed to encode booking")]
    Encode(#[source] serde_json::Error),

    /// The booking could not be persisted.
    #[error("failed to persist booking")]
    Storage(#[from] StorageError),
}

/// Persisted booking state for table-scoped ordering.
pub struct BookingStore {
    storage: Arc<dyn CartStorage>,
}

impl BookingStore {
    /// Use `storage` for the booking slot.
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        Self { storage }
    }

    /// Read the booking; missing or corrupt data reads as empty.
    pub fn load(&self) -> BookingInfo {
        let raw = match self.storage.read(BOOKING_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BookingInfo::default(),
            Err(error) => {
                warn!(%error, "failed to read booking, starting empty");

                return BookingInfo::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(%error, "persisted booking is corrupt, starting empty");

            BookingInfo::default()
        })
    }

    /// Record the tables of a table-scoped route, keeping every other field.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingStoreError`] if the booking cannot be persisted.
    pub fn record_tables(&self, tables: &TableIds) -> Result<BookingInfo, BookingStoreError> {
        let booking = self.load().with_tables(tables);
        let encoded = serde_json::to_string(&booking).map_err(BookingStoreError::Encode)?;

        self.storage.write(BOOKING_SLOT, &encoded)?;

        info!(%tables, "booking tables recorded");

        Ok(booking)
    }
}

impl Debug for BookingStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingStore").finish_non_exhaustive()
    }
}
