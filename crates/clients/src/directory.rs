//! Client directory service.
//!
//! One directory instance is constructed at process start and passed by
//! reference to whatever needs it (no ambient globals). All mutation goes
//! through it, which is also where the tree invariants are enforced:
//! every client id is unique across the whole forest, so a company can
//! never become its own ancestor.

use chrono::{DateTime, Utc};
use tracing::info;

use motorcade_core::{ClientId, DomainError, DomainResult, FleetOrderId, Money, VehicleId};

use crate::client::{Client, ClientRef, CompanyClient, IndividualClient};
use crate::fleet::FleetOrder;

/// Registry of top-level clients plus the fleet orders they placed.
#[derive(Debug, Clone, Default)]
pub struct ClientDirectory {
    clients: Vec<Client>,
    fleet_orders: Vec<FleetOrder>,
}

impl ClientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level clients, in registration order. Nested subsidiaries are
    /// reachable through their parent company.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Register a private buyer.
    pub fn add_individual(&mut self, client: IndividualClient) -> DomainResult<ClientId> {
        self.ensure_new_ids(&[client.id])?;
        let id = client.id;
        info!(client_id = %id, name = %client.name, "individual client registered");
        self.clients.push(Client::Individual(client));
        Ok(id)
    }

    /// Register a top-level company (it may already carry subsidiaries).
    pub fn add_company(&mut self, company: CompanyClient) -> DomainResult<ClientId> {
        let subtree_ids: Vec<ClientId> = company.flatten().iter().map(|c| c.id).collect();
        self.ensure_new_ids(&subtree_ids)?;
        let id = company.id;
        info!(client_id = %id, name = %company.name, "company client registered");
        self.clients.push(Client::Company(company));
        Ok(id)
    }

    /// Attach `subsidiary` under the company identified by `parent_id`.
    ///
    /// The subsidiary (and everything under it) must be new to the
    /// directory: re-attaching an existing company is rejected, which is
    /// what keeps the ownership graph acyclic — a company can never be
    /// moved underneath its own descendant because it is already present.
    pub fn add_subsidiary(
        &mut self,
        parent_id: ClientId,
        subsidiary: CompanyClient,
    ) -> DomainResult<()> {
        let subtree_ids: Vec<ClientId> = subsidiary.flatten().iter().map(|c| c.id).collect();
        self.ensure_new_ids(&subtree_ids)?;

        let parent = self
            .find_company_mut(parent_id)
            .ok_or_else(|| DomainError::not_found(format!("company {parent_id}")))?;
        info!(
            parent_id = %parent_id,
            subsidiary_id = %subsidiary.id,
            name = %subsidiary.name,
            "subsidiary attached"
        );
        parent.attach(subsidiary);
        Ok(())
    }

    /// Detach a direct subsidiary of `parent_id` and hand it back to the
    /// caller with its parent back-reference cleared.
    ///
    /// Returns `Ok(None)` when `subsidiary_id` is not a direct subsidiary
    /// (deliberate no-op). Fails only when the parent itself is unknown.
    pub fn remove_subsidiary(
        &mut self,
        parent_id: ClientId,
        subsidiary_id: ClientId,
    ) -> DomainResult<Option<CompanyClient>> {
        let parent = self
            .find_company_mut(parent_id)
            .ok_or_else(|| DomainError::not_found(format!("company {parent_id}")))?;
        let removed = parent.detach(subsidiary_id);
        if removed.is_some() {
            info!(parent_id = %parent_id, subsidiary_id = %subsidiary_id, "subsidiary detached");
        }
        Ok(removed)
    }

    /// Depth-first search across top-level clients and all nested
    /// subsidiaries; first match wins.
    pub fn find(&self, id: ClientId) -> Option<ClientRef<'_>> {
        for client in &self.clients {
            match client {
                Client::Individual(c) if c.id == id => return Some(ClientRef::Individual(c)),
                Client::Individual(_) => {}
                Client::Company(c) => {
                    if let Some(found) = c.find_company(id) {
                        return Some(ClientRef::Company(found));
                    }
                }
            }
        }
        None
    }

    /// Pre-order flatten of every client in the directory, nested
    /// subsidiaries included.
    pub fn all_clients(&self) -> Vec<ClientRef<'_>> {
        let mut all = Vec::new();
        for client in &self.clients {
            match client {
                Client::Individual(c) => all.push(ClientRef::Individual(c)),
                Client::Company(c) => {
                    all.extend(c.flatten().into_iter().map(ClientRef::Company));
                }
            }
        }
        all
    }

    /// Current fleet discount for a client, recomputed from the live tree.
    pub fn fleet_discount_for(&self, client_id: ClientId) -> DomainResult<u8> {
        let client = self
            .find(client_id)
            .ok_or_else(|| DomainError::not_found(format!("client {client_id}")))?;
        Ok(client.fleet_discount_percent())
    }

    /// Create a fleet order for a client, applying the group's current
    /// discount to `base_amount` and snapshotting the percentage.
    pub fn create_fleet_order(
        &mut self,
        client_id: ClientId,
        vehicle_ids: Vec<VehicleId>,
        quantity: u32,
        base_amount: Money,
        at: DateTime<Utc>,
    ) -> DomainResult<FleetOrder> {
        if quantity == 0 {
            return Err(DomainError::validation("fleet order quantity must be positive"));
        }
        let discount = self.fleet_discount_for(client_id)?;
        let total_amount = base_amount.discounted_by_percent(discount as f64);

        let order = FleetOrder {
            id: FleetOrderId::new(),
            client_id,
            vehicle_ids,
            quantity,
            discount_percent: discount,
            total_amount,
            created_at: at,
        };
        info!(
            fleet_order_id = %order.id,
            client_id = %client_id,
            discount_percent = discount,
            total = %total_amount,
            "fleet order created"
        );
        self.fleet_orders.push(order.clone());
        Ok(order)
    }

    /// Fleet orders placed by one client, in creation order.
    pub fn fleet_orders_for(&self, client_id: ClientId) -> Vec<&FleetOrder> {
        self.fleet_orders
            .iter()
            .filter(|o| o.client_id == client_id)
            .collect()
    }

    fn find_company_mut(&mut self, id: ClientId) -> Option<&mut CompanyClient> {
        self.clients.iter_mut().find_map(|client| match client {
            Client::Company(c) => c.find_company_mut(id),
            Client::Individual(_) => None,
        })
    }

    fn ensure_new_ids(&self, ids: &[ClientId]) -> DomainResult<()> {
        for &id in ids {
            if self.find(id).is_some() {
                return Err(DomainError::validation(format!(
                    "client {id} already exists in the directory"
                )));
            }
        }
        Ok(())
    }
}
