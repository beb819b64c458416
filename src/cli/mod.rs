pub mod commands;
pub mod progress;
pub mod records;
pub mod run;
pub mod status;

pub use commands::{Cli, Commands};

use std::path::PathBuf;
use crate::config::{self, Overrides, Settings, TriggerConfig};
use crate::errors::TriggerError;

/// Load the optional config file and merge it with command-line overrides.
pub(crate) async fn load_settings(config_path: Option<&str>, overrides: &Overrides) -> Result<Settings, TriggerError> {
    let file_config: Option<TriggerConfig> = match config_path {
        Some(path) => Some(config::parse_config(&PathBuf::from(path)).await?),
        None => None,
    };
    config::resolve_settings(file_config.as_ref(), overrides)
}
