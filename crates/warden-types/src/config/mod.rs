//! Configuration schema types.
//!
//! Every field has a default, so an empty JSON object (or no config file at
//! all) yields a runnable configuration. Unknown fields are ignored.
//!
//! - [`loader`] -- config file discovery and key normalization

pub mod loader;

pub use loader::load_config;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WardenError};
use crate::secret::SecretString;

/// Default backend model, routed by its `anthropic/` prefix.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3-5-sonnet-20241022";

/// Default location of the audit trail, relative to the working directory.
pub const DEFAULT_AUDIT_PATH: &str = "logs/audit.jsonl";

// ── Root config ──────────────────────────────────────────────────────────

/// Root configuration for warden.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Execution backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Audit trail settings.
    #[serde(default)]
    pub audit: AuditConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.backend.model.trim().is_empty() {
            return Err(WardenError::ConfigInvalid {
                reason: "backend.model must not be empty".into(),
            });
        }
        if self.backend.max_tokens <= 0 {
            return Err(WardenError::ConfigInvalid {
                reason: format!(
                    "backend.max_tokens must be positive (got {})",
                    self.backend.max_tokens
                ),
            });
        }
        if !(0.0..=2.0).contains(&self.backend.temperature) {
            return Err(WardenError::ConfigInvalid {
                reason: format!(
                    "backend.temperature must be within 0.0..=2.0 (got {})",
                    self.backend.temperature
                ),
            });
        }
        if self.audit.path.trim().is_empty() {
            return Err(WardenError::ConfigInvalid {
                reason: "audit.path must not be empty".into(),
            });
        }
        if self.server.host.trim().is_empty() {
            return Err(WardenError::ConfigInvalid {
                reason: "server.host must not be empty".into(),
            });
        }
        Ok(())
    }
}

// ── Backend ──────────────────────────────────────────────────────────────

/// How to reach the execution backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Model identifier, optionally prefixed with a provider name
    /// (e.g. `anthropic/claude-3-5-sonnet-20241022`).
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on completion length.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i32,

    /// Sampling temperature.
    #[serde(default)]
    pub temperature: f64,

    /// API key. When empty, the provider's environment variable is used.
    #[serde(default)]
    pub api_key: SecretString,

    /// Override for the provider's base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_max_tokens() -> i32 {
    1024
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            api_key: SecretString::default(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Audit ────────────────────────────────────────────────────────────────

/// Where the audit trail is appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Path of the JSON Lines file. `~/` is expanded to the home directory.
    #[serde(default = "default_audit_path")]
    pub path: String,
}

fn default_audit_path() -> String {
    DEFAULT_AUDIT_PATH.into()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            path: default_audit_path(),
        }
    }
}

impl AuditConfig {
    /// The audit file path with `~/` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(rest) = self.path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(&self.path)
    }
}

// ── Server ───────────────────────────────────────────────────────────────

/// HTTP listener settings for `warden serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty means permissive.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}
