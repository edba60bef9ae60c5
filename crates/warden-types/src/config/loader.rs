//! Configuration file discovery and loading.
//!
//! The discovery order is:
//! 1. An explicit path (the CLI's `--config` flag).
//! 2. `WARDEN_CONFIG` environment variable.
//! 3. `~/.warden/config.json`
//! 4. If none found, the built-in defaults.
//!
//! JSON keys are normalized from camelCase to snake_case before
//! deserializing, so `maxTokens` and `max_tokens` are equivalent.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::Config;
use crate::error::{Result, WardenError};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "WARDEN_CONFIG";

/// Discover the config file path using the fallback chain.
///
/// An explicit path or `WARDEN_CONFIG` is returned as-is (existence is
/// checked by [`load_config`]); the home-directory candidate is returned
/// only if it exists.
pub fn discover_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
        && !env_path.trim().is_empty()
    {
        return Some(PathBuf::from(env_path));
    }

    let candidate = dirs::home_dir()?.join(".warden").join("config.json");
    candidate.exists().then_some(candidate)
}

/// Load and validate the configuration.
///
/// A path that was named explicitly (flag or env var) must exist; when
/// discovery finds nothing, defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let Some(path) = discover_config_path(explicit) else {
        tracing::info!("no config file found, using defaults");
        let config = Config::default();
        config.validate()?;
        return Ok(config);
    };

    if !path.exists() {
        return Err(WardenError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    tracing::debug!(path = %path.display(), "loading config file");
    let contents = std::fs::read_to_string(&path)?;
    let config = parse_config(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Parse config JSON, normalizing camelCase keys first.
pub fn parse_config(contents: &str) -> Result<Config> {
    let raw: Value = serde_json::from_str(contents)?;
    if !raw.is_object() {
        return Err(WardenError::ConfigInvalid {
            reason: "config root must be a JSON object".into(),
        });
    }
    Ok(serde_json::from_value(normalize_keys(raw))?)
}

/// Convert camelCase JSON keys to snake_case recursively.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, val)| (camel_to_snake(&key), normalize_keys(val)))
                .collect(),
        ),
        Value::Array(arr) => Value::Array(arr.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Convert a single camelCase string to snake_case.
///
/// A run of capitals is kept together as one word (`baseURL` -> `base_url`).
pub fn camel_to_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}
