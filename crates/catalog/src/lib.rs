//! Vehicle catalogue domain module.
//!
//! This crate contains the vehicle and option model plus the read-only
//! catalogue lookup boundary. Vehicles are immutable from the core's
//! perspective: the storefront only ever reads them.

pub mod catalog;
pub mod vehicle;

pub use catalog::{InMemoryCatalog, VehicleCatalog};
pub use vehicle::{
    Vehicle, VehicleKind, VehicleOption, VehicleSpecs, validate_option_selection,
};
