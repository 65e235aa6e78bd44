//! Continuous polling mode: print each completed refresh cycle.

use std::time::Duration;

use chrono::Utc;

use seatlink_core::{AccountRegistry, Vehicle, clamp_update_interval};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    registry: &AccountRegistry,
    interval: Option<u64>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let bindings = registry.bindings().await;
    let Some(binding) = bindings.first() else {
        return Err(CliError::Config {
            message: "no account bound".into(),
        });
    };

    if let Some(secs) = interval {
        let clamped = clamp_update_interval(Duration::from_secs(secs));
        binding.coordinator.set_update_interval(clamped).await;
    }

    print_cycle(&registry.all_vehicles().await, false, global)?;

    let mut cycles = binding.coordinator.subscribe();
    cycles.mark_unchanged();

    loop {
        tokio::select! {
            changed = cycles.changed() => {
                if changed.is_err() {
                    return Err(CliError::Config {
                        message: "coordinator stopped".into(),
                    });
                }
                let stale = binding.coordinator.is_stale();
                print_cycle(&registry.all_vehicles().await, stale, global)?;
            }
            _ = tokio::signal::ctrl_c() => {
                if !global.quiet {
                    eprintln!("stopping");
                }
                return Ok(());
            }
        }
    }
}

fn print_cycle(vehicles: &[Vehicle], stale: bool, global: &GlobalOpts) -> Result<(), CliError> {
    if !global.quiet {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
        eprintln!("{}", output::cycle_header(&timestamp, stale));
    }
    output::print_vehicles(vehicles, global.output)
}
