//! Command handlers: bridge CLI args to the session and output formatting.

pub mod config_cmd;
pub mod login;
pub mod region;
pub mod search;
pub mod serve;

use std::path::PathBuf;

use tuyasl_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The config file in effect: `--config` or the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(tuyasl_config::config_path)
}

/// Load the config and apply CLI overrides.
///
/// A missing default file yields defaults; a missing `--config` file is an error.
pub fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = config_file(global);
    if global.config.is_some() && !path.exists() {
        return Err(CliError::Validation {
            field: "config".into(),
            reason: format!("file not found: {}", path.display()),
        });
    }

    let mut cfg = tuyasl_config::load_config_from(&path)?;
    if let Some(timeout_ms) = global.timeout {
        cfg.timeout_ms = timeout_ms;
    }
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(cfg)
}
