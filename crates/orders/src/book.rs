//! Order book service: order assembly and lifecycle management.
//!
//! Holds the active tax and payment strategies plus every order created in
//! the session. One instance is constructed at process start and passed by
//! reference; hosts with concurrent callers serialize access per book.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use motorcade_cart::CartItem;
use motorcade_core::{DomainError, DomainResult, Money, OrderId};
use motorcade_pricing::{PaymentKind, PaymentStrategy, TaxStrategy};

use crate::order::Order;
use crate::state::OrderState;

/// Orders plus the strategies the next checkout will use.
#[derive(Debug, Clone)]
pub struct OrderBook {
    orders: Vec<Order>,
    tax_strategy: TaxStrategy,
    payment_strategy: PaymentStrategy,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// A fresh book selling in the default market (France) for cash.
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            tax_strategy: TaxStrategy::for_country("FR"),
            payment_strategy: PaymentStrategy::new(PaymentKind::Cash),
        }
    }

    pub fn tax_strategy(&self) -> TaxStrategy {
        self.tax_strategy
    }

    pub fn payment_strategy(&self) -> &PaymentStrategy {
        &self.payment_strategy
    }

    /// Mutable access for credit configuration before checkout.
    pub fn payment_strategy_mut(&mut self) -> &mut PaymentStrategy {
        &mut self.payment_strategy
    }

    /// Select the tax strategy by country code (unknown codes fall back to
    /// France, the designed default).
    pub fn set_tax_strategy(&mut self, country_code: &str) {
        self.tax_strategy = TaxStrategy::for_country(country_code);
    }

    pub fn set_payment_strategy(&mut self, kind: PaymentKind) {
        self.payment_strategy = PaymentStrategy::new(kind);
    }

    /// Tax on `amount` under the active strategy.
    pub fn calculate_tax(&self, amount: Money) -> Money {
        self.tax_strategy.calculate_tax(amount)
    }

    /// Assemble a priced order from the cart lines.
    ///
    /// The items are deep-copied into the order; the caller keeps ownership
    /// of the live cart and is responsible for clearing it afterwards (the
    /// book deliberately does not reach into the cart).
    pub fn create_order(&mut self, items: &[CartItem], at: DateTime<Utc>) -> DomainResult<Order> {
        if items.is_empty() {
            return Err(DomainError::validation(
                "cannot create an order from an empty cart",
            ));
        }

        let base_total: Money = items.iter().map(CartItem::line_total).sum();
        let tax_amount = self.tax_strategy.calculate_tax(base_total);
        let total_amount = base_total + tax_amount;

        let order = Order::new(
            OrderId::new(),
            // Structural clone: order items must never alias the cart.
            items.to_vec(),
            total_amount,
            tax_amount,
            self.tax_strategy.country_name().to_string(),
            self.payment_strategy.kind(),
            at,
        );
        info!(
            order_id = %order.order_id(),
            total = %total_amount,
            tax = %tax_amount,
            country = self.tax_strategy.country_name(),
            "order created"
        );
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Drive an order through the lifecycle guard.
    pub fn transition_order(
        &mut self,
        order_id: OrderId,
        target: OrderState,
        at: DateTime<Utc>,
    ) -> DomainResult<OrderState> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.order_id() == order_id)
            .ok_or_else(|| DomainError::not_found(format!("order {order_id}")))?;

        match order.transition_to(target, at) {
            Ok(()) => {
                info!(order_id = %order_id, state = target.as_str(), "order state changed");
                Ok(target)
            }
            Err(err) => {
                warn!(order_id = %order_id, %err, "order transition rejected");
                Err(err)
            }
        }
    }

    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.order_id() == order_id)
    }

    /// All orders of the session, in creation order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use motorcade_catalog::{Vehicle, VehicleKind, VehicleOption, VehicleSpecs};
    use motorcade_core::{OptionId, VehicleId};

    fn vehicle(base_major: i64) -> Vehicle {
        Vehicle {
            id: VehicleId::new(),
            name: "Corsa GT".to_string(),
            kind: VehicleKind::Automobile,
            brand: "Corsa".to_string(),
            model: "GT".to_string(),
            year: 2024,
            base_price: Money::from_major(base_major),
            description: String::new(),
            image: String::new(),
            specs: VehicleSpecs::default(),
            available_options: Vec::new(),
            in_stock_since: Utc::now(),
            is_on_sale: false,
            sale_discount: None,
        }
    }

    fn option(price_major: i64) -> VehicleOption {
        VehicleOption {
            id: OptionId::new(),
            name: "Premium sound".to_string(),
            price: Money::from_major(price_major),
            category: "comfort".to_string(),
            incompatible_with: Vec::new(),
        }
    }

    fn one_line_cart() -> Vec<CartItem> {
        vec![CartItem::new(vehicle(50_000), vec![option(2_000)])]
    }

    #[test]
    fn checkout_example_prices_to_the_cent() {
        // base 50 000 + option 2 000, France at 20%.
        let mut book = OrderBook::new();
        let order = book.create_order(&one_line_cart(), Utc::now()).unwrap();

        assert_eq!(order.tax_amount(), Money::from_major(10_400));
        assert_eq!(order.total_amount(), Money::from_major(62_400));
        assert_eq!(order.country(), "France");
        assert_eq!(order.state(), OrderState::Pending);
        assert_eq!(order.payment_method(), PaymentKind::Cash);
    }

    #[test]
    fn empty_cart_is_rejected_and_nothing_is_stored() {
        let mut book = OrderBook::new();
        let err = book.create_order(&[], Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(book.orders().is_empty());
    }

    #[test]
    fn order_items_do_not_alias_the_cart() {
        let mut book = OrderBook::new();
        let mut cart_items = one_line_cart();
        let order = book.create_order(&cart_items, Utc::now()).unwrap();

        // The caller keeps mutating its cart; the stored order is frozen.
        cart_items[0].quantity = 99;
        cart_items.clear();
        assert_eq!(book.order(order.order_id()).unwrap().items()[0].quantity, 1);
    }

    #[test]
    fn switching_tax_strategy_only_affects_subsequent_orders() {
        let mut book = OrderBook::new();
        let before = book.create_order(&one_line_cart(), Utc::now()).unwrap();

        book.set_tax_strategy("DE");
        let after = book.create_order(&one_line_cart(), Utc::now()).unwrap();

        assert_eq!(before.tax_amount(), Money::from_major(10_400));
        assert_eq!(after.tax_amount(), Money::from_major(52_000).scale(0.19));
        assert_eq!(after.country(), "Germany");
    }

    #[test]
    fn transition_walks_the_happy_path_and_refreshes_updated_at() {
        let created = Utc::now();
        let mut book = OrderBook::new();
        let order = book.create_order(&one_line_cart(), created).unwrap();
        let id = order.order_id();

        let later = created + Duration::hours(1);
        book.transition_order(id, OrderState::Validated, later).unwrap();
        assert_eq!(book.order(id).unwrap().updated_at(), later);

        // Repeating the same transition is rejected.
        let err = book
            .transition_order(id, OrderState::Validated, later + Duration::hours(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::IllegalTransition { .. }));

        book.transition_order(id, OrderState::Delivered, later + Duration::hours(2))
            .unwrap();
        assert_eq!(book.order(id).unwrap().state(), OrderState::Delivered);
    }

    #[test]
    fn delivery_cannot_skip_validation() {
        let mut book = OrderBook::new();
        let order = book.create_order(&one_line_cart(), Utc::now()).unwrap();
        let id = order.order_id();

        let err = book
            .transition_order(id, OrderState::Delivered, Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::IllegalTransition { .. }));
        assert_eq!(book.order(id).unwrap().state(), OrderState::Pending);
    }

    #[test]
    fn pending_orders_can_be_cancelled() {
        let mut book = OrderBook::new();
        let order = book.create_order(&one_line_cart(), Utc::now()).unwrap();
        let id = order.order_id();

        book.transition_order(id, OrderState::Cancelled, Utc::now()).unwrap();
        assert_eq!(book.order(id).unwrap().state(), OrderState::Cancelled);
    }

    #[test]
    fn transition_of_unknown_order_fails_not_found() {
        let mut book = OrderBook::new();
        let err = book
            .transition_order(OrderId::new(), OrderState::Validated, Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn payment_method_tag_is_snapshotted_at_creation() {
        let mut book = OrderBook::new();
        book.set_payment_strategy(PaymentKind::Credit);
        let order = book.create_order(&one_line_cart(), Utc::now()).unwrap();
        assert_eq!(order.payment_method(), PaymentKind::Credit);
    }
}
