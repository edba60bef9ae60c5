//! `warden config` -- display resolved configuration.
//!
//! The API key is always shown as `[REDACTED]`.

use warden_types::Config;

/// Display the resolved configuration as formatted JSON.
pub fn config_show(config: &Config) {
    match render(config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: failed to serialize config: {e}"),
    }
}

fn render(config: &Config) -> serde_json::Result<String> {
    serde_json::to_string_pretty(config)
}
