//! Clap definitions for the `seatlink` binary.
//!
//! Kept free of non-clap dependencies so build.rs can include it
//! directly for man page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "seatlink",
    about = "Control and monitor SEAT Connect vehicles",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use (defaults to the configured default_account)
    #[arg(long, short = 'a', global = true, env = "SEATLINK_ACCOUNT")]
    pub account: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, env = "SEATLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all vehicles on the account
    Vehicles,

    /// Show the latest state of one vehicle
    Status {
        /// Vehicle identification number
        vin: String,
    },

    /// Lock a vehicle
    Lock {
        /// Vehicle identification number
        vin: String,
    },

    /// Unlock a vehicle
    Unlock {
        /// Vehicle identification number
        vin: String,
    },

    /// Control the climatization system
    Climate(ClimateArgs),

    /// Poll continuously and print each completed refresh
    Watch {
        /// Override the polling interval in seconds
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Inspect and manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ClimateArgs {
    #[command(subcommand)]
    pub command: ClimateCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClimateCommand {
    /// Start climatization
    Start {
        /// Vehicle identification number
        vin: String,
    },
    /// Stop climatization
    Stop {
        /// Vehicle identification number
        vin: String,
    },
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (secrets redacted)
    Show,
    /// Print the config file path
    Path,
    /// List configured accounts
    Accounts,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
