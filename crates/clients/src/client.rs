use serde::{Deserialize, Serialize};

use motorcade_core::{ClientId, Entity};

/// Client kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    Individual,
    Company,
}

/// A private buyer. Counts as one employee and never earns a fleet discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualClient {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl IndividualClient {
    pub fn new(id: ClientId, name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// A company client, possibly heading a group of subsidiaries.
///
/// Subsidiaries are owned exclusively by their parent; the `parent` field is
/// a plain id back-reference for traversal only. Because a subsidiary can
/// only be *moved into* a parent by value, the subsidiary graph is a forest
/// by construction; the directory additionally rejects duplicate ids so no
/// company can reappear inside its own subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyClient {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    /// Company registration number.
    pub siret: String,
    /// Direct headcount, excluding subsidiaries.
    pub employees: u32,
    subsidiaries: Vec<CompanyClient>,
    parent: Option<ClientId>,
}

impl CompanyClient {
    pub fn new(
        id: ClientId,
        name: impl Into<String>,
        email: impl Into<String>,
        siret: impl Into<String>,
        employees: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            siret: siret.into(),
            employees,
            subsidiaries: Vec::new(),
            parent: None,
        }
    }

    pub fn subsidiaries(&self) -> &[CompanyClient] {
        &self.subsidiaries
    }

    pub fn parent(&self) -> Option<ClientId> {
        self.parent
    }

    /// Group headcount: own employees plus all subsidiaries', recursively.
    pub fn total_employees(&self) -> u64 {
        self.employees as u64
            + self
                .subsidiaries
                .iter()
                .map(CompanyClient::total_employees)
                .sum::<u64>()
    }

    /// Fleet discount tier for the whole group, in percent.
    ///
    /// Recomputed from the live subtree on every call so it stays correct
    /// after subsidiary mutation.
    pub fn fleet_discount_percent(&self) -> u8 {
        fleet_discount_for_headcount(self.total_employees())
    }

    /// Whether `id` names this company or any direct or indirect subsidiary.
    pub fn contains(&self, id: ClientId) -> bool {
        self.id == id || self.subsidiaries.iter().any(|s| s.contains(id))
    }

    /// Depth-first lookup within this company's subtree.
    pub fn find_company(&self, id: ClientId) -> Option<&CompanyClient> {
        if self.id == id {
            return Some(self);
        }
        self.subsidiaries.iter().find_map(|s| s.find_company(id))
    }

    pub(crate) fn find_company_mut(&mut self, id: ClientId) -> Option<&mut CompanyClient> {
        if self.id == id {
            return Some(self);
        }
        self.subsidiaries
            .iter_mut()
            .find_map(|s| s.find_company_mut(id))
    }

    /// Pre-order flatten: this company followed by all descendants.
    pub fn flatten(&self) -> Vec<&CompanyClient> {
        let mut all = vec![self];
        for subsidiary in &self.subsidiaries {
            all.extend(subsidiary.flatten());
        }
        all
    }

    pub(crate) fn attach(&mut self, mut child: CompanyClient) {
        child.parent = Some(self.id);
        self.subsidiaries.push(child);
    }

    /// Detach a *direct* subsidiary by id, clearing its parent back-reference.
    pub(crate) fn detach(&mut self, subsidiary_id: ClientId) -> Option<CompanyClient> {
        let index = self.subsidiaries.iter().position(|s| s.id == subsidiary_id)?;
        let mut removed = self.subsidiaries.remove(index);
        removed.parent = None;
        Some(removed)
    }
}

/// Fleet discount step function over group headcount.
pub fn fleet_discount_for_headcount(total_employees: u64) -> u8 {
    match total_employees {
        1000.. => 15,
        500.. => 12,
        100.. => 8,
        50.. => 5,
        10.. => 3,
        _ => 0,
    }
}

/// A client of the storefront: either a private buyer or a company group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum Client {
    Individual(IndividualClient),
    Company(CompanyClient),
}

impl Client {
    pub fn client_id(&self) -> ClientId {
        match self {
            Client::Individual(c) => c.id,
            Client::Company(c) => c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Client::Individual(c) => &c.name,
            Client::Company(c) => &c.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Client::Individual(c) => &c.email,
            Client::Company(c) => &c.email,
        }
    }

    pub fn kind(&self) -> ClientKind {
        match self {
            Client::Individual(_) => ClientKind::Individual,
            Client::Company(_) => ClientKind::Company,
        }
    }

    pub fn total_employees(&self) -> u64 {
        match self {
            Client::Individual(_) => 1,
            Client::Company(c) => c.total_employees(),
        }
    }

    /// Individuals never earn a fleet discount.
    pub fn fleet_discount_percent(&self) -> u8 {
        match self {
            Client::Individual(_) => 0,
            Client::Company(c) => c.fleet_discount_percent(),
        }
    }
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> &Self::Id {
        match self {
            Client::Individual(c) => &c.id,
            Client::Company(c) => &c.id,
        }
    }
}

/// Borrowed view of a client anywhere in the directory, including companies
/// nested inside another company's subtree.
#[derive(Debug, Clone, Copy)]
pub enum ClientRef<'a> {
    Individual(&'a IndividualClient),
    Company(&'a CompanyClient),
}

impl<'a> ClientRef<'a> {
    pub fn client_id(&self) -> ClientId {
        match self {
            ClientRef::Individual(c) => c.id,
            ClientRef::Company(c) => c.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            ClientRef::Individual(c) => &c.name,
            ClientRef::Company(c) => &c.name,
        }
    }

    pub fn kind(&self) -> ClientKind {
        match self {
            ClientRef::Individual(_) => ClientKind::Individual,
            ClientRef::Company(_) => ClientKind::Company,
        }
    }

    pub fn total_employees(&self) -> u64 {
        match self {
            ClientRef::Individual(_) => 1,
            ClientRef::Company(c) => c.total_employees(),
        }
    }

    pub fn fleet_discount_percent(&self) -> u8 {
        match self {
            ClientRef::Individual(_) => 0,
            ClientRef::Company(c) => c.fleet_discount_percent(),
        }
    }
}
