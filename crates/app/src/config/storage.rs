//! Storage config

use std::path::PathBuf;

use clap::Args;

/// Local storage settings.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart and booking
    #[arg(long, env = "BISTRO_DATA_DIR", default_value = ".bistro")]
    pub data_dir: PathBuf,
}
