//! Command dispatch: bridges CLI args -> registry operations -> output.

pub mod actions;
pub mod config_cmd;
pub mod status;
pub mod vehicles;
pub mod watch;

use seatlink_core::AccountRegistry;

use crate::cli::{ClimateCommand, Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an account-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    registry: &AccountRegistry,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Vehicles => vehicles::handle(registry, global).await,
        Command::Status { vin } => status::handle(registry, &vin, global).await,
        Command::Lock { vin } => actions::lock(registry, &vin, global).await,
        Command::Unlock { vin } => actions::unlock(registry, &vin, global).await,
        Command::Climate(args) => match args.command {
            ClimateCommand::Start { vin } => actions::climate_start(registry, &vin, global).await,
            ClimateCommand::Stop { vin } => actions::climate_stop(registry, &vin, global).await,
        },
        Command::Watch { interval } => watch::handle(registry, interval, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
