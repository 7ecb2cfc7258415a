use serde::{Deserialize, Serialize};

use motorcade_catalog::{Vehicle, VehicleOption};
use motorcade_core::Money;

/// One line of the cart: a vehicle, its selected options, and a quantity.
///
/// The vehicle is a value snapshot taken from the catalogue at add time, not
/// a live reference; cart contents stay stable even if the catalogue moves.
/// A cart holds at most one item per distinct vehicle id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub vehicle: Vehicle,
    pub selected_options: Vec<VehicleOption>,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(vehicle: Vehicle, selected_options: Vec<VehicleOption>) -> Self {
        Self {
            vehicle,
            selected_options,
            quantity: 1,
        }
    }

    /// Price of the selected options.
    pub fn options_price(&self) -> Money {
        self.selected_options.iter().map(|o| o.price).sum()
    }

    /// Unit price: effective (sale-adjusted) vehicle price plus options.
    pub fn unit_price(&self) -> Money {
        self.vehicle.effective_price() + self.options_price()
    }

    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use motorcade_catalog::{VehicleKind, VehicleSpecs};
    use motorcade_core::{OptionId, VehicleId};

    fn vehicle(base_major: i64, sale: Option<u8>) -> Vehicle {
        Vehicle {
            id: VehicleId::new(),
            name: "Test".to_string(),
            kind: VehicleKind::Automobile,
            brand: "T".to_string(),
            model: "1".to_string(),
            year: 2024,
            base_price: Money::from_major(base_major),
            description: String::new(),
            image: String::new(),
            specs: VehicleSpecs::default(),
            available_options: Vec::new(),
            in_stock_since: Utc::now(),
            is_on_sale: sale.is_some(),
            sale_discount: sale,
        }
    }

    fn option(price_major: i64) -> VehicleOption {
        VehicleOption {
            id: OptionId::new(),
            name: "Opt".to_string(),
            price: Money::from_major(price_major),
            category: "misc".to_string(),
            incompatible_with: Vec::new(),
        }
    }

    #[test]
    fn line_total_multiplies_unit_price_by_quantity() {
        let mut item = CartItem::new(vehicle(50_000, None), vec![option(2_000)]);
        item.quantity = 3;
        assert_eq!(item.line_total(), Money::from_major((50_000 + 2_000) * 3));
    }

    #[test]
    fn unit_price_uses_sale_adjusted_vehicle_price() {
        let item = CartItem::new(vehicle(10_000, Some(20)), vec![option(500)]);
        assert_eq!(item.unit_price(), Money::from_major(8_000 + 500));
    }
}
