//! Clients domain module (individuals, companies, subsidiaries).
//!
//! Companies form a composite: a company owns its subsidiaries outright and
//! a subsidiary keeps a non-owning id back-reference to its parent. Group
//! headcount and fleet discounts are computed recursively over the live
//! subtree, never cached.

pub mod client;
pub mod directory;
pub mod fleet;

pub use client::{Client, ClientKind, ClientRef, CompanyClient, IndividualClient};
pub use directory::ClientDirectory;
pub use fleet::FleetOrder;
