//! Read-only catalogue lookup boundary.
//!
//! The storefront core never owns vehicles; it reads them from whatever
//! catalogue the host wires in. `InMemoryCatalog` is the reference
//! implementation used by tests and local tooling.

use motorcade_core::{DomainError, DomainResult, VehicleId};

use crate::vehicle::Vehicle;

/// Read-only vehicle lookup.
pub trait VehicleCatalog {
    /// Look up a vehicle by id.
    fn vehicle(&self, id: VehicleId) -> Option<&Vehicle>;

    /// All published vehicles, in catalogue order.
    fn vehicles(&self) -> &[Vehicle];

    /// Like [`VehicleCatalog::vehicle`], but failing with `NotFound`.
    fn require_vehicle(&self, id: VehicleId) -> DomainResult<&Vehicle> {
        self.vehicle(id)
            .ok_or_else(|| DomainError::not_found(format!("vehicle {id}")))
    }
}

/// In-memory catalogue.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    vehicles: Vec<Vehicle>,
}

impl InMemoryCatalog {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    pub fn publish(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }
}

impl VehicleCatalog for InMemoryCatalog {
    fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }
}
