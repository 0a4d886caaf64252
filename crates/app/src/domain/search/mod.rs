//! Search & Filter

mod controller;

pub use controller::*;
