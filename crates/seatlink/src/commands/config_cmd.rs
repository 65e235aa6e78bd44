//! Config inspection command handlers.

use seatlink_config::{AccountProfile, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", seatlink_config::config_path().display());
            Ok(())
        }
        ConfigCommand::Show => {
            let cfg = redacted(config::load(global)?);
            match global.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cfg)?),
                OutputFormat::Table => print!(
                    "{}",
                    toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                        message: e.to_string(),
                    })?
                ),
            }
            Ok(())
        }
        ConfigCommand::Accounts => {
            let cfg = config::load(global)?;
            let default = cfg.default_account.as_deref().unwrap_or("");
            let mut names: Vec<_> = cfg.accounts.keys().collect();
            names.sort();
            for name in names {
                if name == default {
                    println!("{name} (default)");
                } else {
                    println!("{name}");
                }
            }
            Ok(())
        }
    }
}

/// Strip secret material before rendering.
fn redacted(mut cfg: Config) -> Config {
    for profile in cfg.accounts.values_mut() {
        redact_profile(profile);
    }
    cfg
}

fn redact_profile(profile: &mut AccountProfile) {
    if profile.client_secret.is_some() {
        profile.client_secret = Some("***".into());
    }
    if profile.refresh_token.is_some() {
        profile.refresh_token = Some("***".into());
    }
}
