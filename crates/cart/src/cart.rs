//! Cart service: the single writer over one cart aggregate.
//!
//! Construct one `Cart` per shopping session and pass it by reference; the
//! host is responsible for serializing concurrent access (one mutex per
//! cart when the environment is multi-threaded).

use chrono::Utc;
use tracing::info;

use motorcade_catalog::{Vehicle, VehicleOption, validate_option_selection};
use motorcade_core::{DomainError, DomainResult, Money, VehicleId};

use crate::history::CartHistory;
use crate::item::CartItem;

/// A shopping cart with reversible history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    history: CartHistory,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            history: CartHistory::new(Utc::now()),
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn history(&self) -> &CartHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Add a vehicle with a validated option selection.
    ///
    /// If the vehicle is already in the cart, its quantity is incremented
    /// and its selected options are **replaced** by the new selection (the
    /// repeat-add comes from a reconfigured options screen, which is the
    /// selection the buyer saw last).
    pub fn add_item(&mut self, vehicle: Vehicle, options: Vec<VehicleOption>) -> DomainResult<()> {
        validate_option_selection(&vehicle, &options)?;

        match self.items.iter_mut().find(|i| i.vehicle.id == vehicle.id) {
            Some(existing) => {
                existing.quantity += 1;
                existing.selected_options = options;
            }
            None => {
                info!(vehicle_id = %vehicle.id, name = %vehicle.name, "vehicle added to cart");
                self.items.push(CartItem::new(vehicle, options));
            }
        }
        self.commit();
        Ok(())
    }

    /// Remove a vehicle's line entirely.
    pub fn remove_item(&mut self, vehicle_id: VehicleId) -> DomainResult<()> {
        self.position_of(vehicle_id)?;
        self.items.retain(|i| i.vehicle.id != vehicle_id);
        self.commit();
        Ok(())
    }

    /// Replace the selected options of an existing line.
    pub fn set_item_options(
        &mut self,
        vehicle_id: VehicleId,
        options: Vec<VehicleOption>,
    ) -> DomainResult<()> {
        let index = self.position_of(vehicle_id)?;
        validate_option_selection(&self.items[index].vehicle, &options)?;
        self.items[index].selected_options = options;
        self.commit();
        Ok(())
    }

    pub fn increment_quantity(&mut self, vehicle_id: VehicleId) -> DomainResult<()> {
        let index = self.position_of(vehicle_id)?;
        self.items[index].quantity += 1;
        self.commit();
        Ok(())
    }

    /// Decrement a line's quantity, dropping the line when it reaches zero.
    pub fn decrement_quantity(&mut self, vehicle_id: VehicleId) -> DomainResult<()> {
        let index = self.position_of(vehicle_id)?;
        if self.items[index].quantity <= 1 {
            self.items.remove(index);
        } else {
            self.items[index].quantity -= 1;
        }
        self.commit();
        Ok(())
    }

    /// Empty the cart. Recorded in history, so it can be undone.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Restore the previous snapshot. Returns `false` when there is no
    /// older state to go back to.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(memento) => {
                self.items = memento.items().to_vec();
                true
            }
            None => false,
        }
    }

    /// Restore the next snapshot after an undo. Returns `false` when
    /// already at the newest state.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(memento) => {
                self.items = memento.items().to_vec();
                true
            }
            None => false,
        }
    }

    /// Sum of line totals (sale-adjusted vehicle price plus options, times
    /// quantity).
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn position_of(&self, vehicle_id: VehicleId) -> DomainResult<usize> {
        self.items
            .iter()
            .position(|i| i.vehicle.id == vehicle_id)
            .ok_or_else(|| DomainError::not_found(format!("cart item for vehicle {vehicle_id}")))
    }

    fn commit(&mut self) {
        self.history.record(&self.items, Utc::now());
    }
}
