//! CLI command implementations for `warden`.
//!
//! - [`serve`] -- HTTP API server.
//! - [`run`] -- Single-request orchestration.
//! - [`check`] -- Offline classification and policy preview.
//! - [`audit_cmd`] -- Audit trail display.
//! - [`config_cmd`] -- Resolved configuration display.

pub mod audit_cmd;
pub mod check;
pub mod config_cmd;
pub mod run;
pub mod serve;

use std::path::Path;

use warden_types::Config;

/// Load configuration from the given path override or via auto-discovery.
///
/// Discovery order when no override is given:
/// 1. `WARDEN_CONFIG` env var
/// 2. `~/.warden/config.json`
///
/// Returns a default `Config` if no config file is found.
pub fn load_config(config_override: Option<&str>) -> anyhow::Result<Config> {
    let config = warden_types::config::load_config(config_override.map(Path::new))?;
    Ok(config)
}
