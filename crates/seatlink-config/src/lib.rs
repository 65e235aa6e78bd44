//! Shared configuration for SEAT Connect tools.
//!
//! TOML account profiles, credential resolution (env + plaintext), and
//! translation to `seatlink_core::AccountConfig`. The CLI layers its
//! flag-aware overrides on top of this crate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use seatlink_core::AccountConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for account '{account}'")]
    NoCredentials { account: String },

    #[error("unknown account '{account}'")]
    UnknownAccount { account: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Account used when no `--account` flag is given.
    pub default_account: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub accounts: HashMap<String, AccountProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_account: Some("default".into()),
            defaults: Defaults::default(),
            accounts: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Polling cadence in seconds; clamped on use.
    #[serde(default = "default_update_interval")]
    pub update_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            update_interval: default_update_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_update_interval() -> u64 {
    seatlink_core::DEFAULT_UPDATE_INTERVAL.as_secs()
}

/// A named SEAT Connect account.
#[derive(Debug, Deserialize, Serialize)]
pub struct AccountProfile {
    /// OAuth client id issued for this account.
    pub client_id: String,

    /// Client secret (plaintext — prefer the env var).
    pub client_secret: Option<String>,

    /// Long-lived refresh token (plaintext — prefer the env var).
    pub refresh_token: Option<String>,

    /// Override polling cadence in seconds.
    pub update_interval: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "seatlink", "seatlink").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("seatlink");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path (the CLI's `--config` flag, tests).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SEATLINK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn account_env_var(account: &str, suffix: &str) -> String {
    let account = account.to_uppercase().replace('-', "_");
    format!("SEATLINK_{account}_{suffix}")
}

/// Resolve the client secret: env var first, plaintext config second.
pub fn resolve_client_secret(
    profile: &AccountProfile,
    account: &str,
) -> Result<SecretString, ConfigError> {
    if let Ok(val) = std::env::var(account_env_var(account, "CLIENT_SECRET")) {
        return Ok(SecretString::from(val));
    }
    if let Some(ref secret) = profile.client_secret {
        return Ok(SecretString::from(secret.clone()));
    }
    Err(ConfigError::NoCredentials {
        account: account.into(),
    })
}

/// Resolve the refresh token: env var first, plaintext config second.
pub fn resolve_refresh_token(
    profile: &AccountProfile,
    account: &str,
) -> Result<SecretString, ConfigError> {
    if let Ok(val) = std::env::var(account_env_var(account, "REFRESH_TOKEN")) {
        return Ok(SecretString::from(val));
    }
    if let Some(ref token) = profile.refresh_token {
        return Ok(SecretString::from(token.clone()));
    }
    Err(ConfigError::NoCredentials {
        account: account.into(),
    })
}

/// Build an `AccountConfig` from a named profile.
pub fn profile_to_account_config(
    config: &Config,
    account: &str,
) -> Result<AccountConfig, ConfigError> {
    let profile = config
        .accounts
        .get(account)
        .ok_or_else(|| ConfigError::UnknownAccount {
            account: account.into(),
        })?;

    if profile.client_id.is_empty() {
        return Err(ConfigError::Validation {
            field: "client_id".into(),
            reason: format!("empty for account '{account}'"),
        });
    }

    Ok(AccountConfig {
        entry_id: account.into(),
        client_id: profile.client_id.clone(),
        client_secret: resolve_client_secret(profile, account)?,
        refresh_token: resolve_refresh_token(profile, account)?,
        update_interval_secs: profile
            .update_interval
            .unwrap_or(config.defaults.update_interval),
    })
}

/// The account to operate on: explicit choice, else the configured default.
pub fn select_account<'a>(config: &'a Config, requested: Option<&'a str>) -> Option<&'a str> {
    requested.or(config.default_account.as_deref())
}
