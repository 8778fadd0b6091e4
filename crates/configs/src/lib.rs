//! Layered configuration for the hotline binary.
//!
//! Values come from the process environment (prefix `HOTLINE_`, `__` for
//! nesting, e.g. `HOTLINE_DATABASE__URL`), with a `.env` file loaded first
//! for local development. Secrets stay wrapped in `secrecy` types so they
//! never end up in debug output or logs.

use config::{Config, Environment};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Address the webhook shim binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Seconds a user must wait between accepted submissions.
    #[serde(default = "default_rate_limit_seconds")]
    pub rate_limit_seconds: u64,

    /// Moderation channel chat id; 0 disables forwarding.
    #[serde(default)]
    pub mod_chat_id: i64,

    /// Admin user ids, comma-separated in the environment. Used only to
    /// refuse blocking an admin; authorization itself happens upstream.
    #[serde(default)]
    pub admin_ids: Vec<i64>,

    /// Absent means in-memory state (development / tests only).
    #[serde(default)]
    pub database: Option<DatabaseSettings>,

    /// Absent means attachments are kept without a storage URL.
    #[serde(default)]
    pub s3: Option<S3Settings>,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,

    /// How long startup may wait for the database before aborting.
    #[serde(default = "default_startup_window_secs")]
    pub startup_window_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct S3Settings {
    pub endpoint: String,
    pub bucket: String,
    #[serde(default)]
    pub region: Option<String>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_rate_limit_seconds() -> u64 {
    30
}

fn default_startup_window_secs() -> u64 {
    60
}

/// Loads settings from `.env` (if present) and the process environment.
pub fn load() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::builder()
        .add_source(
            Environment::with_prefix("HOTLINE")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("admin_ids"),
        )
        .build()?;
    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_environment() {
        let settings: Settings = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.listen_addr, "127.0.0.1:8080");
        assert_eq!(settings.rate_limit_seconds, 30);
        assert_eq!(settings.mod_chat_id, 0);
        assert!(settings.admin_ids.is_empty());
        assert!(settings.database.is_none());
        assert!(settings.s3.is_none());
    }
}
