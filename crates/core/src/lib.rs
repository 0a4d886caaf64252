//! Bistro
//!
//! Domain core for a restaurant ordering client: menu products and prices,
//! the shopping cart and its totals, search and category filters, news posts
//! with vouchers, and table bookings.

pub mod booking;
pub mod cart;
pub mod fixtures;
pub mod ids;
pub mod posts;
pub mod prices;
pub mod products;
pub mod search;
pub mod serde_ext;
pub mod vouchers;
