//! Orders domain module: lifecycle state machine and order assembly.
//!
//! An order is created exactly once from a non-empty cart, freezing a deep
//! copy of the cart items; after that, the only mutation it accepts is a
//! guarded state transition.

pub mod book;
pub mod order;
pub mod state;

pub use book::OrderBook;
pub use order::Order;
pub use state::OrderState;
