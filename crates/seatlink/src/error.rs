//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use seatlink_config::ConfigError;
use seatlink_core::{CoreError, ErrorKind};

/// Exit codes surfaced by the binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the SEAT Connect backend")]
    #[diagnostic(
        code(seatlink::connection_failed),
        help("Check your network connection and try again.\nDetails: {message}")
    )]
    ConnectionFailed { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(seatlink::timeout),
        help("Increase the timeout with --timeout or try again later.\nDetails: {message}")
    )]
    Timeout { message: String },

    #[error("The backend is rate limiting requests")]
    #[diagnostic(
        code(seatlink::rate_limited),
        help("Wait a minute before retrying, or increase the polling interval.")
    )]
    RateLimited,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed for account '{account}'")]
    #[diagnostic(
        code(seatlink::auth_failed),
        help(
            "The stored refresh token was rejected.\n\
             Re-authenticate and update the token for this account."
        )
    )]
    AuthFailed { account: String },

    #[error("No credentials configured for account '{account}'")]
    #[diagnostic(
        code(seatlink::no_credentials),
        help(
            "Add client_secret and refresh_token to the account profile,\n\
             or set SEATLINK_{account_env}_CLIENT_SECRET / SEATLINK_{account_env}_REFRESH_TOKEN."
        )
    )]
    NoCredentials { account: String, account_env: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Vehicle '{vin}' not found")]
    #[diagnostic(
        code(seatlink::vehicle_not_found),
        help("Run: seatlink vehicles to see the VINs on this account")
    )]
    VehicleNotFound { vin: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("SEAT Connect API error ({kind}): {message}")]
    #[diagnostic(code(seatlink::api_error))]
    ApiError { kind: ErrorKind, message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Account '{name}' not found in configuration")]
    #[diagnostic(
        code(seatlink::unknown_account),
        help(
            "Add an [accounts.{name}] section to the config file.\n\
             Expected at: {path}"
        )
    )]
    UnknownAccount { name: String, path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(seatlink::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(seatlink::config))]
    Config { message: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(seatlink::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::VehicleNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::ApiError { kind, .. } => match kind {
                ErrorKind::Network | ErrorKind::Server => exit_code::CONNECTION,
                ErrorKind::Timeout => exit_code::TIMEOUT,
                ErrorKind::Auth => exit_code::AUTH,
                _ => exit_code::GENERAL,
            },
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::AuthenticationFailed { .. } => CliError::AuthFailed {
                account: "current".into(),
            },

            CoreError::VehicleNotFound { vin } => CliError::VehicleNotFound { vin },

            CoreError::Api { kind, message }
            | CoreError::FetchFailed { kind, message }
            | CoreError::UpdateFailed { kind, message } => match kind {
                ErrorKind::Auth => CliError::AuthFailed {
                    account: "current".into(),
                },
                ErrorKind::Timeout => CliError::Timeout { message },
                ErrorKind::Network => CliError::ConnectionFailed { message },
                ErrorKind::RateLimit => CliError::RateLimited,
                kind => CliError::ApiError { kind, message },
            },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::CoordinatorStopped => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownAccount { account } => CliError::UnknownAccount {
                name: account,
                path: seatlink_config::config_path().display().to_string(),
            },
            ConfigError::NoCredentials { account } => {
                let account_env = account.to_uppercase().replace('-', "_");
                CliError::NoCredentials {
                    account,
                    account_env,
                }
            }
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
