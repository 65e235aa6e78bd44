use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

/// Slowest cadence that keeps charging telemetry usable.
pub const MAX_UPDATE_INTERVAL_SECS: u64 = 600;
/// Fastest cadence the backend tolerates without rate limiting.
pub const MIN_UPDATE_INTERVAL_SECS: u64 = 30;
/// Default polling cadence.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(90);

/// Clamp a requested polling interval into the supported range.
pub fn clamp_update_interval(requested: Duration) -> Duration {
    Duration::from_secs(
        requested
            .as_secs()
            .clamp(MIN_UPDATE_INTERVAL_SECS, MAX_UPDATE_INTERVAL_SECS),
    )
}

/// Everything needed to bind one SEAT Connect account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    /// Stable identifier for this account binding.
    pub entry_id: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub refresh_token: SecretString,
    /// Requested polling cadence; clamped on use.
    #[serde(default = "default_interval_secs")]
    pub update_interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    DEFAULT_UPDATE_INTERVAL.as_secs()
}

impl AccountConfig {
    /// The effective polling interval, clamped to the supported range.
    pub fn update_interval(&self) -> Duration {
        clamp_update_interval(Duration::from_secs(self.update_interval_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds() {
        assert_eq!(
            clamp_update_interval(Duration::from_secs(5)),
            Duration::from_secs(30)
        );
        assert_eq!(
            clamp_update_interval(Duration::from_secs(3600)),
            Duration::from_secs(600)
        );
        assert_eq!(
            clamp_update_interval(Duration::from_secs(90)),
            Duration::from_secs(90)
        );
    }

    #[test]
    fn interval_defaults_when_absent() {
        let config: AccountConfig = serde_json::from_value(serde_json::json!({
            "entry_id": "home",
            "client_id": "id",
            "client_secret": "sec",
            "refresh_token": "tok"
        }))
        .expect("config parses");
        assert_eq!(config.update_interval(), DEFAULT_UPDATE_INTERVAL);
    }
}
