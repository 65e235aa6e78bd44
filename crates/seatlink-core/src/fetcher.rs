// ── Vehicle fetcher ──
//
// One fetch cycle: enumerate the account's vehicles, fan out per-VIN
// status requests (throttled by the transport's concurrency cap), and
// normalize into an atomic snapshot. A failure on any vehicle fails the
// whole cycle — partial snapshots are never produced.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::debug;

use seatlink_api::ConnectClient;

use crate::convert::vehicle_from_parts;
use crate::error::{CoreError, kind_of};
use crate::model::VehicleSnapshot;

/// The seam the coordinator polls through.
///
/// Production uses [`VehicleFetcher`]; tests swap in scripted sources.
#[async_trait]
pub trait VehicleSource: Send + Sync + 'static {
    /// Produce a complete snapshot, or fail without side effects.
    async fn fetch(&self) -> Result<VehicleSnapshot, CoreError>;
}

/// Fetches and normalizes vehicle data through a [`ConnectClient`].
#[derive(Clone)]
pub struct VehicleFetcher {
    client: Arc<ConnectClient>,
}

impl VehicleFetcher {
    pub fn new(client: Arc<ConnectClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VehicleSource for VehicleFetcher {
    async fn fetch(&self) -> Result<VehicleSnapshot, CoreError> {
        let entries = self.client.list_vehicles().await.map_err(|e| {
            CoreError::FetchFailed {
                kind: kind_of(&e),
                message: e.to_string(),
            }
        })?;

        if let Some(bad) = entries.iter().find(|e| e.vin.is_empty()) {
            return Err(CoreError::FetchFailed {
                kind: crate::error::ErrorKind::Protocol,
                message: format!(
                    "vehicle entry without a VIN (name: {:?})",
                    bad.name.as_deref().or(bad.nickname.as_deref())
                ),
            });
        }

        // Per-VIN status fetches run concurrently; the transport
        // semaphore bounds actual parallelism.
        let statuses = join_all(entries.iter().map(|entry| {
            let client = Arc::clone(&self.client);
            async move { client.vehicle_status(&entry.vin).await }
        }))
        .await;

        let mut vehicles = Vec::with_capacity(entries.len());
        for (entry, status) in entries.iter().zip(statuses) {
            // First error wins; later results are discarded.
            let status = status.map_err(|e| CoreError::FetchFailed {
                kind: kind_of(&e),
                message: format!("status fetch for {} failed: {e}", entry.vin),
            })?;
            vehicles.push(vehicle_from_parts(entry, &status)?);
        }

        let snapshot = VehicleSnapshot::from_vehicles(vehicles);
        debug!(vehicles = snapshot.len(), "fetch cycle complete");
        Ok(snapshot)
    }
}
