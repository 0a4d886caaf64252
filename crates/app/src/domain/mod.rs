//! Bistro Domain Concerns

pub mod booking;
pub mod cart;
pub mod posts;
pub mod products;
pub mod search;
