use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use motorcade_core::{ClientId, Entity, FleetOrderId, Money, VehicleId};

/// A multi-vehicle order placed by a company, with the group's fleet
/// discount applied. Immutable once created; `discount_percent` is a
/// snapshot of the discount at creation time, not a live view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetOrder {
    pub id: FleetOrderId,
    pub client_id: ClientId,
    pub vehicle_ids: Vec<VehicleId>,
    pub quantity: u32,
    /// Fleet discount at creation time, in percent.
    pub discount_percent: u8,
    /// Amount after the discount.
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
}

impl Entity for FleetOrder {
    type Id = FleetOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
