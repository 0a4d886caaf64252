//! Posts

pub mod errors;
pub mod records;
pub mod service;

pub use errors::PostsServiceError;
pub use service::*;
