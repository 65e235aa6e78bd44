//! Config resolution for the CLI: file + env + flag overrides.

use std::time::Duration;

use seatlink_config::Config;
use seatlink_core::{AccountBinding, AccountRegistry, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config, honoring an explicit `--config` path.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    match &global.config {
        Some(path) => Ok(seatlink_config::load_config_from(path)?),
        None => Ok(seatlink_config::load_config_or_default()),
    }
}

/// The account name to operate on.
pub fn account_name(global: &GlobalOpts, config: &Config) -> Result<String, CliError> {
    seatlink_config::select_account(config, global.account.as_deref())
        .map(str::to_owned)
        .ok_or_else(|| CliError::UnknownAccount {
            name: "(none)".into(),
            path: seatlink_config::config_path().display().to_string(),
        })
}

/// Bind the selected account and return a registry holding it.
///
/// Runs the first refresh, so a returned registry always has a snapshot
/// to serve from.
pub async fn build_registry(global: &GlobalOpts) -> Result<AccountRegistry, CliError> {
    let config = load(global)?;
    let account = account_name(global, &config)?;
    let account_config = seatlink_config::profile_to_account_config(&config, &account)?;

    let transport = TransportConfig {
        timeout: Duration::from_secs(global.timeout),
        ..TransportConfig::default()
    };

    tracing::debug!(account = %account, "binding account");
    let binding = AccountBinding::connect_with(&account_config, &transport).await?;

    let registry = AccountRegistry::new();
    registry.add(binding).await;
    Ok(registry)
}
