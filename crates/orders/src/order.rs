use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use motorcade_cart::CartItem;
use motorcade_core::{DomainError, DomainResult, Entity, Money, OrderId};
use motorcade_pricing::PaymentKind;

use crate::state::OrderState;

/// A priced, frozen order.
///
/// The items are a deep copy of the cart lines at creation time, never a
/// live reference to the cart. State is the only mutable part and changes
/// only through [`Order::transition_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    items: Vec<CartItem>,
    state: OrderState,
    /// Base amount plus tax.
    total_amount: Money,
    tax_amount: Money,
    /// Display name of the tax country at creation time.
    country: String,
    payment_method: PaymentKind,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    pub(crate) fn new(
        id: OrderId,
        items: Vec<CartItem>,
        total_amount: Money,
        tax_amount: Money,
        country: String,
        payment_method: PaymentKind,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            items,
            state: OrderState::Pending,
            total_amount,
            tax_amount,
            country,
            payment_method,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn tax_amount(&self) -> Money {
        self.tax_amount
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn payment_method(&self) -> PaymentKind {
        self.payment_method
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a guarded state transition.
    ///
    /// On success the state changes and `updated_at` is refreshed to `at`.
    /// On failure the order is left exactly as it was and the rejection is
    /// reported to the caller.
    pub fn transition_to(&mut self, next: OrderState, at: DateTime<Utc>) -> DomainResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(DomainError::illegal_transition(
                self.state.as_str(),
                next.as_str(),
            ));
        }
        self.state = next;
        self.updated_at = at;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
