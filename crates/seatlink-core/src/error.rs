// ── Core error types ──
//
// Consumer-facing errors from seatlink-core. Consumers never see raw
// HTTP statuses or serde failures — the `From<seatlink_api::Error>`
// impl translates transport-layer errors into domain variants, and
// `ErrorKind` gives a stable class for availability signaling.

use thiserror::Error;

/// Stable error classification surfaced to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credentials invalid or refresh failed; re-authentication required.
    Auth,
    /// Upstream 429 after exhausted retries.
    RateLimit,
    /// Upstream 5xx after exhausted retries.
    Server,
    /// Connection failure after exhausted retries.
    Network,
    /// Per-request timeout after exhausted retries.
    Timeout,
    /// 4xx other than 401/429 — backend-contract error.
    ClientFatal,
    /// Unexpected payload shape.
    Protocol,
}

impl ErrorKind {
    /// Whether this class is transient (the next poll may succeed).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimit | Self::Server | Self::Network | Self::Timeout
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Auth => "auth",
            Self::RateLimit => "rate_limit",
            Self::Server => "server",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::ClientFatal => "client_fatal",
            Self::Protocol => "protocol",
        };
        f.write_str(name)
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// A single API operation failed (command dispatch, enumeration).
    #[error("SEAT Connect API error ({kind}): {message}")]
    Api { kind: ErrorKind, message: String },

    /// A fetch cycle failed; carries the first per-vehicle error.
    /// No partial snapshot was produced.
    #[error("Failed to refresh vehicle data ({kind}): {message}")]
    FetchFailed { kind: ErrorKind, message: String },

    /// A coordinator refresh failed; the previous snapshot is retained.
    #[error("Vehicle data update failed ({kind}): {message}")]
    UpdateFailed { kind: ErrorKind, message: String },

    #[error("Unknown VIN: {vin}")]
    VehicleNotFound { vin: String },

    /// The polling loop has been shut down; the handle is dead.
    #[error("Coordinator stopped")]
    CoordinatorStopped,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The error class, where one applies.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::AuthenticationFailed { .. } => Some(ErrorKind::Auth),
            Self::Api { kind, .. }
            | Self::FetchFailed { kind, .. }
            | Self::UpdateFailed { kind, .. } => Some(*kind),
            Self::VehicleNotFound { .. } | Self::CoordinatorStopped | Self::Config { .. } => None,
        }
    }
}

/// Classify a transport error into its consumer-facing kind.
pub(crate) fn kind_of(err: &seatlink_api::Error) -> ErrorKind {
    match err {
        seatlink_api::Error::Auth { .. } => ErrorKind::Auth,
        seatlink_api::Error::RateLimited => ErrorKind::RateLimit,
        seatlink_api::Error::Server { .. } => ErrorKind::Server,
        seatlink_api::Error::Network(_) => ErrorKind::Network,
        seatlink_api::Error::Timeout { .. } => ErrorKind::Timeout,
        seatlink_api::Error::ClientFatal { .. } => ErrorKind::ClientFatal,
        seatlink_api::Error::Protocol { .. } | seatlink_api::Error::InvalidUrl(_) => {
            ErrorKind::Protocol
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<seatlink_api::Error> for CoreError {
    fn from(err: seatlink_api::Error) -> Self {
        match &err {
            seatlink_api::Error::Auth { message } => CoreError::AuthenticationFailed {
                message: message.clone(),
            },
            other => CoreError::Api {
                kind: kind_of(other),
                message: err.to_string(),
            },
        }
    }
}
