// Transport configuration for the SEAT Connect client.
//
// Carries base URL, per-attempt timeout, retry tuning, and the
// concurrency cap. `ConnectClient` and `OAuthSession` both build their
// `reqwest::Client` through this module.

use std::time::Duration;

use url::Url;

use crate::error::Error;
use crate::retry::RetryPolicy;

/// Production SEAT Connect API base URL.
pub const API_BASE_URL: &str = "https://my-seat.apps.emea.vwapps.io";

/// OAuth2 authorize endpoint (VW Group identity service).
pub const AUTH_AUTHORIZE_URL: &str = "https://identity.vwgroup.io/signin-service/v1/authorize";

/// OAuth2 token endpoint (VW Group identity service).
pub const AUTH_TOKEN_URL: &str = "https://identity.vwgroup.io/signin-service/v1/token";

/// Default per-attempt timeout (request start to full body receipt).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on concurrent in-flight requests per client.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Transport configuration for building a [`crate::ConnectClient`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// API base URL. Override for tests / non-production stacks.
    pub base_url: Url,
    /// Per-attempt timeout. There is no overall deadline across retries.
    pub timeout: Duration,
    /// Retry budget and backoff factor.
    pub retry: RetryPolicy,
    /// Maximum concurrent in-flight requests.
    pub concurrency: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(API_BASE_URL).expect("static base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// No reqwest-level timeout is set: the per-attempt deadline is
    /// enforced with `tokio::time::timeout` so it can be classified as
    /// [`Error::Timeout`] rather than a generic transport failure.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .user_agent(concat!("seatlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Network)
    }
}
