use thiserror::Error;

/// Top-level error type for the `seatlink-api` crate.
///
/// Every raw HTTP outcome is classified into exactly one of these variants
/// before the retry policy sees it. `seatlink-core` maps them into
/// consumer-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected (HTTP 401) or token refresh failed.
    /// Never retried — demands user re-authentication.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ── Transient classes ───────────────────────────────────────────
    /// Upstream returned HTTP 429.
    #[error("Rate limited by the SEAT Connect backend")]
    RateLimited,

    /// Upstream returned a 5xx status.
    #[error("Server error (HTTP {status})")]
    Server { status: u16 },

    /// Connection-level failure (DNS, refused, reset mid-body).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Per-attempt deadline elapsed before the full body was received.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Fatal classes ───────────────────────────────────────────────
    /// 4xx other than 401/429 — a programmer or backend-contract error.
    #[error("Request rejected (HTTP {status}): {message}")]
    ClientFatal { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Unexpected payload from SEAT Connect: {message}")]
    Protocol { message: String, body: String },

    /// URL construction failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if the retry policy may retry this error.
    ///
    /// Retryable: `RateLimited`, `Server`, `Network`, `Timeout`.
    /// Everything else propagates immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Server { .. } | Self::Network(_) | Self::Timeout { .. }
        )
    }

    /// Returns `true` if this error demands re-authentication.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Classify a non-success HTTP status into an error variant.
    ///
    /// 401 → `Auth`, 429 → `RateLimited`, 5xx → `Server`,
    /// any other 4xx → `ClientFatal`.
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 => Self::Auth {
                message: "SEAT Connect rejected the access token".into(),
            },
            429 => Self::RateLimited,
            s if (500..600).contains(&s) => Self::Server { status: s },
            s => Self::ClientFatal {
                status: s,
                message: if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("client error")
                        .to_owned()
                } else {
                    body
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn status_classification() {
        assert!(Error::from_status(reqwest::StatusCode::UNAUTHORIZED, String::new()).is_auth());
        assert!(matches!(
            Error::from_status(reqwest::StatusCode::TOO_MANY_REQUESTS, String::new()),
            Error::RateLimited
        ));
        assert!(matches!(
            Error::from_status(reqwest::StatusCode::BAD_GATEWAY, String::new()),
            Error::Server { status: 502 }
        ));
        assert!(matches!(
            Error::from_status(reqwest::StatusCode::NOT_FOUND, "gone".into()),
            Error::ClientFatal { status: 404, .. }
        ));
    }

    #[test]
    fn retryability_per_class() {
        assert!(Error::RateLimited.is_retryable());
        assert!(Error::Server { status: 503 }.is_retryable());
        assert!(Error::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(!Error::Auth { message: String::new() }.is_retryable());
        assert!(
            !Error::ClientFatal {
                status: 404,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            !Error::Protocol {
                message: String::new(),
                body: String::new()
            }
            .is_retryable()
        );
    }
}
