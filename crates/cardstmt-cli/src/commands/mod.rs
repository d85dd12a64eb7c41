//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;
pub mod reader;
pub mod text;

use std::path::Path;

use tracing::debug;

use cardstmt_core::CardstmtConfig;

/// Load configuration from an explicit path, else the default config file if
/// one exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CardstmtConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(CardstmtConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(CardstmtConfig::from_file(&default_path)?)
    } else {
        Ok(CardstmtConfig::default())
    }
}
