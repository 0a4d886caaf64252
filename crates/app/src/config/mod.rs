//! Client configuration

use clap::Args;

use crate::config::{
    api::ApiConfig,
    logging::LoggingConfig,
    menu::MenuConfig,
    storage::StorageConfig,
};

pub mod api;
pub mod logging;
pub mod menu;
pub mod storage;

pub use api::RetryPolicy;
pub use logging::LogFormat;

/// Settings shared by every `bistro` command.
///
/// Each flag can also be set through its environment variable. A `.env`
/// file in the working directory is read first.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Ordering API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Menu page settings.
    #[command(flatten)]
    pub menu: MenuConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load the `.env` file if present.
    ///
    /// Call before parsing so its values are visible to the `env` fallbacks.
    pub fn load_dotenv() {
        // Missing .env is fine
        _ = dotenvy::dotenv();
    }
}
