//! Menu config

use std::{path::PathBuf, time::Duration};

use bistro::products::CategoryId;
use clap::Args;

/// Menu page settings.
#[derive(Debug, Clone, Args)]
pub struct MenuConfig {
    /// Quiet period before search text is applied, in milliseconds
    #[arg(long, env = "BISTRO_SEARCH_DEBOUNCE_MS", default_value_t = 500)]
    pub search_debounce_ms: u64,

    /// Category whose products make up the combo section
    #[arg(long, env = "BISTRO_COMBO_CATEGORY", default_value_t = 6)]
    pub combo_category: u64,

    /// Serve products from the bundled sample menu instead of the API
    #[arg(long, env = "BISTRO_OFFLINE")]
    pub offline: bool,

    /// Serve products from this YAML menu instead of the API
    #[arg(long, env = "BISTRO_MENU_FIXTURE")]
    pub menu_fixture: Option<PathBuf>,
}

impl MenuConfig {
    /// Search debounce quiet period.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Combo category id.
    pub fn combo_category(&self) -> CategoryId {
        CategoryId::new(self.combo_category)
    }
}
