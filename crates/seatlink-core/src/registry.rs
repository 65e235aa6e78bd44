// ── Account registry ──
//
// One process can bind several SEAT Connect accounts. The registry maps
// entry ids to their bindings and routes VIN-addressed commands to the
// right account — by scanning published snapshots, never by issuing
// HTTP requests.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::{info, warn};

use seatlink_api::{ConnectClient, OAuthSession, TokenSet, TransportConfig, VehicleAction};

use crate::config::AccountConfig;
use crate::coordinator::VehicleCoordinator;
use crate::error::CoreError;
use crate::fetcher::VehicleFetcher;
use crate::model::Vehicle;

/// Everything bound for one account: its authenticated client and the
/// coordinator polling it.
pub struct AccountBinding {
    pub entry_id: String,
    pub client: Arc<ConnectClient>,
    pub coordinator: VehicleCoordinator,
}

impl AccountBinding {
    /// Build the full stack for one account: OAuth session, client,
    /// fetcher, and a started coordinator (first refresh included).
    pub async fn connect(account: &AccountConfig) -> Result<Self, CoreError> {
        Self::connect_with(account, &TransportConfig::default()).await
    }

    /// As [`connect`](Self::connect), with transport overrides.
    pub async fn connect_with(
        account: &AccountConfig,
        transport: &TransportConfig,
    ) -> Result<Self, CoreError> {
        let tokens = TokenSet::from_refresh_token(account.refresh_token.clone());
        let session = OAuthSession::new(
            account.client_id.clone(),
            account.client_secret.clone(),
            tokens,
        )?;
        let client = Arc::new(ConnectClient::new(Arc::new(session), transport)?);
        let coordinator = VehicleCoordinator::start(
            Arc::new(VehicleFetcher::new(Arc::clone(&client))),
            account.update_interval(),
        )
        .await?;

        Ok(Self {
            entry_id: account.entry_id.clone(),
            client,
            coordinator,
        })
    }
}

/// Registry of bound accounts, preserving registration order.
///
/// Order matters: when the same VIN appears under more than one account,
/// the earliest-registered binding wins.
#[derive(Default)]
pub struct AccountRegistry {
    bindings: RwLock<IndexMap<String, Arc<AccountBinding>>>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding. Returns `true` when it is the first one.
    /// An existing binding under the same entry id is replaced and shut
    /// down.
    pub async fn add(&self, binding: AccountBinding) -> bool {
        let mut bindings = self.bindings.write().await;
        let was_empty = bindings.is_empty();
        info!(entry_id = %binding.entry_id, "account bound");
        if let Some(previous) = bindings.insert(binding.entry_id.clone(), Arc::new(binding)) {
            warn!(entry_id = %previous.entry_id, "replaced existing account binding");
            previous.coordinator.shutdown();
        }
        was_empty
    }

    /// Unbind an account, stopping its polling loop. Returns `true` when
    /// this removed the last binding.
    pub async fn remove(&self, entry_id: &str) -> bool {
        let mut bindings = self.bindings.write().await;
        // shift_remove keeps registration order for the survivors
        if let Some(binding) = bindings.shift_remove(entry_id) {
            binding.coordinator.shutdown();
            info!(entry_id, "account unbound");
            bindings.is_empty()
        } else {
            false
        }
    }

    pub async fn get(&self, entry_id: &str) -> Option<Arc<AccountBinding>> {
        self.bindings.read().await.get(entry_id).cloned()
    }

    /// All bindings in registration order.
    pub async fn bindings(&self) -> Vec<Arc<AccountBinding>> {
        self.bindings.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.bindings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bindings.read().await.is_empty()
    }

    /// Find the account whose latest snapshot contains `vin`.
    ///
    /// Scans snapshots in registration order and takes the first match;
    /// no HTTP is issued. An unknown VIN is an error, not a fetch.
    pub async fn resolve(&self, vin: &str) -> Result<Arc<AccountBinding>, CoreError> {
        let bindings = self.bindings.read().await;
        let mut matches = bindings.values().filter(|b| {
            b.coordinator
                .snapshot()
                .is_some_and(|s| s.contains_vin(vin))
        });

        let Some(first) = matches.next() else {
            return Err(CoreError::VehicleNotFound { vin: vin.into() });
        };
        if matches.next().is_some() {
            warn!(
                vin,
                entry_id = %first.entry_id,
                "VIN present in multiple accounts; using earliest binding"
            );
        }
        Ok(Arc::clone(first))
    }

    /// Look up a vehicle's latest state across all accounts.
    pub async fn vehicle(&self, vin: &str) -> Result<Vehicle, CoreError> {
        let binding = self.resolve(vin).await?;
        binding
            .coordinator
            .snapshot()
            .as_deref()
            .and_then(|s| s.get(vin))
            .cloned()
            .ok_or_else(|| CoreError::VehicleNotFound { vin: vin.into() })
    }

    /// All vehicles across all accounts, in registration order. A VIN
    /// bound twice appears once, under its earliest binding.
    pub async fn all_vehicles(&self) -> Vec<Vehicle> {
        let bindings = self.bindings.read().await;
        let mut seen = std::collections::HashSet::new();
        let mut vehicles = Vec::new();
        for binding in bindings.values() {
            if let Some(snapshot) = binding.coordinator.snapshot() {
                for vehicle in snapshot.iter() {
                    if seen.insert(vehicle.vin.clone()) {
                        vehicles.push(vehicle.clone());
                    }
                }
            }
        }
        vehicles
    }

    // ── Command dispatch ─────────────────────────────────────────

    /// Dispatch a remote command to the account owning `vin`, then
    /// refresh that account so state reflects the command.
    ///
    /// The command result stands on its own: a post-command refresh
    /// failure is logged, not returned — the next poll will catch up.
    pub async fn execute(&self, vin: &str, action: VehicleAction) -> Result<(), CoreError> {
        let binding = self.resolve(vin).await?;
        binding.client.execute_action(vin, action).await?;
        info!(vin, %action, "command dispatched");

        if let Err(err) = binding.coordinator.request_refresh().await {
            warn!(vin, error = %err, "post-command refresh failed");
        }
        Ok(())
    }

    pub async fn lock_vehicle(&self, vin: &str) -> Result<(), CoreError> {
        self.execute(vin, VehicleAction::Lock).await
    }

    pub async fn unlock_vehicle(&self, vin: &str) -> Result<(), CoreError> {
        self.execute(vin, VehicleAction::Unlock).await
    }

    pub async fn start_climate(&self, vin: &str) -> Result<(), CoreError> {
        self.execute(vin, VehicleAction::StartClimate).await
    }

    pub async fn stop_climate(&self, vin: &str) -> Result<(), CoreError> {
        self.execute(vin, VehicleAction::StopClimate).await
    }
}
