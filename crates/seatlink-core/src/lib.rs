// seatlink-core: Domain layer between seatlink-api and consumers.
//
// Owns the normalized vehicle model, the polling coordinator, and the
// account registry that routes VINs to their owning account.

pub mod config;
mod convert;
pub mod coordinator;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod registry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{
    AccountConfig, DEFAULT_UPDATE_INTERVAL, MAX_UPDATE_INTERVAL_SECS, MIN_UPDATE_INTERVAL_SECS,
    clamp_update_interval,
};
pub use coordinator::{RefreshFailure, VehicleCoordinator};
pub use error::{CoreError, ErrorKind};
pub use fetcher::{VehicleFetcher, VehicleSource};
pub use model::{Vehicle, VehicleSnapshot};
pub use registry::{AccountBinding, AccountRegistry};

// Re-exports so downstream consumers don't need seatlink-api directly:
// the action enum for command dispatch, the transport knobs for
// `AccountBinding::connect_with`.
pub use seatlink_api::{RetryPolicy, TransportConfig, VehicleAction};
