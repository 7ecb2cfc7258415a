//! Shopping cart domain module with reversible history.
//!
//! Every mutating operation snapshots the full item list into an append-only
//! memento history (capped at 20 entries), which is what undo/redo restore
//! from. A rejected operation touches neither the items nor the history.

pub mod cart;
pub mod history;
pub mod item;

pub use cart::Cart;
pub use history::{CartHistory, CartMemento, HISTORY_CAP};
pub use item::CartItem;
