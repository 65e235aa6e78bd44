// seatlink-api: Async Rust client for the SEAT Connect backend

pub mod auth;
pub mod client;
pub mod error;
pub mod retry;
pub mod transport;
pub mod types;

mod actions;
mod vehicles;

pub use auth::{OAuthSession, TokenSet};
pub use client::ConnectClient;
pub use error::Error;
pub use retry::RetryPolicy;
pub use transport::TransportConfig;
pub use types::{VehicleAction, VehicleEntry, VehicleStatus};
