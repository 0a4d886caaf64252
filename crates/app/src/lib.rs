//! Services, persistence and runtime wiring for the bistro ordering client.

pub mod config;
pub mod context;
pub mod domain;
pub mod http;
pub mod logging;
