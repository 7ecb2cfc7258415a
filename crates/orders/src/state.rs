//! Order lifecycle states and the transition table.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an order.
///
/// The happy path is `pending -> validated -> delivered`. Cancellation is a
/// fourth, terminal state and is only reachable from `pending`: once an
/// order has been validated it is in preparation and can no longer be
/// cancelled through the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Pending,
    Validated,
    Delivered,
    Cancelled,
}

impl OrderState {
    /// Wire/display tag, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderState::Pending => "pending",
            OrderState::Validated => "validated",
            OrderState::Delivered => "delivered",
            OrderState::Cancelled => "cancelled",
        }
    }

    /// Short human label for the calling UI.
    pub fn label(self) -> &'static str {
        match self {
            OrderState::Pending => "In progress",
            OrderState::Validated => "Validated",
            OrderState::Delivered => "Delivered",
            OrderState::Cancelled => "Cancelled",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OrderState::Pending => "The order is awaiting validation",
            OrderState::Validated => "The order has been validated and is in preparation",
            OrderState::Delivered => "The order has been delivered to the client",
            OrderState::Cancelled => "The order was cancelled before validation",
        }
    }

    /// Actions that make sense in this state. Informational for callers;
    /// the core only enforces the transition guard itself.
    pub fn actions(self) -> &'static [&'static str] {
        match self {
            OrderState::Pending => &["Validate the order", "Cancel the order"],
            OrderState::Validated => &["Mark as delivered", "Generate the documents"],
            OrderState::Delivered => &["Download the documents", "View the summary"],
            OrderState::Cancelled => &["View the summary"],
        }
    }

    /// States legally reachable from this one.
    pub fn next_states(self) -> &'static [OrderState] {
        match self {
            OrderState::Pending => &[OrderState::Validated, OrderState::Cancelled],
            OrderState::Validated => &[OrderState::Delivered],
            OrderState::Delivered | OrderState::Cancelled => &[],
        }
    }

    /// Transition guard. Self-transitions and backward transitions are
    /// always illegal.
    pub fn can_transition_to(self, next: OrderState) -> bool {
        self.next_states().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.next_states().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderState; 4] = [
        OrderState::Pending,
        OrderState::Validated,
        OrderState::Delivered,
        OrderState::Cancelled,
    ];

    #[test]
    fn only_the_declared_edges_are_legal() {
        let legal = [
            (OrderState::Pending, OrderState::Validated),
            (OrderState::Pending, OrderState::Cancelled),
            (OrderState::Validated, OrderState::Delivered),
        ];
        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "transition {from:?} -> {to:?}"
                );
            }
        }
    }

    #[test]
    fn self_transitions_are_illegal() {
        for state in ALL {
            assert!(!state.can_transition_to(state));
        }
    }

    #[test]
    fn delivered_and_cancelled_are_terminal() {
        assert!(OrderState::Delivered.is_terminal());
        assert!(OrderState::Cancelled.is_terminal());
        assert!(!OrderState::Pending.is_terminal());
        assert!(!OrderState::Validated.is_terminal());
    }

    #[test]
    fn every_state_describes_itself() {
        for state in ALL {
            assert!(!state.label().is_empty());
            assert!(!state.description().is_empty());
            assert!(!state.actions().is_empty());
        }
    }
}
