//! Bookings

mod store;

pub use store::*;
