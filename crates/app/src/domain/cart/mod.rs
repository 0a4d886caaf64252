//! Cart

pub mod errors;
pub mod events;
pub mod storage;
mod store;

pub use errors::CartStoreError;
pub use events::{CartChange, CartEvent, CartSummary};
pub use storage::{
    BOOKING_SLOT, CART_SLOT, CartStorage, FileStorage, MemoryStorage, MockCartStorage,
    StorageError,
};
pub use store::*;
