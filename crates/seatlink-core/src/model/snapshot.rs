use std::collections::HashMap;

use serde::Serialize;

use super::Vehicle;

/// One fetch cycle's worth of vehicle state, keyed by VIN.
///
/// Built atomically by the fetcher and replaced wholesale on each
/// successful refresh — never mutated in place. The key set equals the
/// set returned by the enumerate call, and each key equals its record's
/// `vin`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    vehicles: HashMap<String, Vehicle>,
}

impl VehicleSnapshot {
    /// Build a snapshot from normalized records, keyed by each record's VIN.
    pub fn from_vehicles(vehicles: impl IntoIterator<Item = Vehicle>) -> Self {
        Self {
            vehicles: vehicles
                .into_iter()
                .map(|v| (v.vin.clone(), v))
                .collect(),
        }
    }

    pub fn get(&self, vin: &str) -> Option<&Vehicle> {
        self.vehicles.get(vin)
    }

    pub fn contains_vin(&self, vin: &str) -> bool {
        self.vehicles.contains_key(vin)
    }

    pub fn vins(&self) -> impl Iterator<Item = &str> {
        self.vehicles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl<'a> IntoIterator for &'a VehicleSnapshot {
    type Item = &'a Vehicle;
    type IntoIter = std::collections::hash_map::Values<'a, String, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.values()
    }
}
