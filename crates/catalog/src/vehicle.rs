use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use motorcade_core::{DomainError, DomainResult, Entity, Money, OptionId, VehicleId};

/// Kind of vehicle sold by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Automobile,
    Scooter,
}

/// A configurable option for a vehicle (paint, towbar, sound system, ...).
///
/// `incompatible_with` lists options that cannot be combined with this one.
/// Incompatibility is symmetric in effect even when declared on only one
/// side: if A lists B, or B lists A, the pair is mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleOption {
    pub id: OptionId,
    pub name: String,
    pub price: Money,
    /// Grouping label for display ("comfort", "performance", ...).
    pub category: String,
    pub incompatible_with: Vec<OptionId>,
}

impl VehicleOption {
    /// Whether this option and `other` exclude each other, checking both
    /// declaration sides.
    pub fn conflicts_with(&self, other: &VehicleOption) -> bool {
        self.incompatible_with.contains(&other.id) || other.incompatible_with.contains(&self.id)
    }
}

/// Free-text display specifications. Not interpreted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VehicleSpecs {
    pub engine: String,
    pub power: String,
    pub acceleration: String,
    pub top_speed: String,
}

/// A vehicle as published by the catalogue. Owned by the catalogue and
/// immutable from the storefront core's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub kind: VehicleKind,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub base_price: Money,
    pub description: String,
    /// Reference to the vehicle image (URL or asset key).
    pub image: String,
    pub specs: VehicleSpecs,
    /// Ordered sequence of options this vehicle can be configured with.
    pub available_options: Vec<VehicleOption>,
    pub in_stock_since: DateTime<Utc>,
    pub is_on_sale: bool,
    /// Sale discount as a percentage of the base price (0..=100).
    pub sale_discount: Option<u8>,
}

impl Vehicle {
    /// Price after the sale discount, if any.
    ///
    /// `sale_discount` is a percentage: a vehicle at 50 000.00 with a 10%
    /// sale sells at 45 000.00. A vehicle flagged `is_on_sale` without a
    /// discount value sells at its base price.
    pub fn effective_price(&self) -> Money {
        match (self.is_on_sale, self.sale_discount) {
            (true, Some(percent)) => self.base_price.discounted_by_percent(percent as f64),
            _ => self.base_price,
        }
    }

    /// Look up one of this vehicle's available options by id.
    pub fn option(&self, id: OptionId) -> Option<&VehicleOption> {
        self.available_options.iter().find(|o| o.id == id)
    }
}

impl Entity for Vehicle {
    type Id = VehicleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validate a proposed option selection for a vehicle.
///
/// Checks that every option belongs to `vehicle.available_options`, that no
/// option appears twice, and that no two selected options exclude each other
/// (in either declaration direction).
pub fn validate_option_selection(
    vehicle: &Vehicle,
    options: &[VehicleOption],
) -> DomainResult<()> {
    for (i, option) in options.iter().enumerate() {
        if vehicle.option(option.id).is_none() {
            return Err(DomainError::validation(format!(
                "option '{}' is not available for vehicle '{}'",
                option.name, vehicle.name
            )));
        }
        if options[..i].iter().any(|earlier| earlier.id == option.id) {
            return Err(DomainError::validation(format!(
                "option '{}' selected more than once",
                option.name
            )));
        }
        for earlier in &options[..i] {
            if option.conflicts_with(earlier) {
                return Err(DomainError::incompatible_options(earlier.id, option.id));
            }
        }
    }
    Ok(())
}
