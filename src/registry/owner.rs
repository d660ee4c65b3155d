//! Owner registry

use crate::state::StateStore;

use super::error::{RegistryError, RegistryResult};
use super::model::{owner_key, Owner, OWNER_KEY_PREFIX};

/// CRUD over Owner records, keyed by owner id
pub struct OwnerRegistry<'a> {
    store: &'a StateStore,
}

impl<'a> OwnerRegistry<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self { store }
    }

    /// Register a new owner. Fails if the id is already taken.
    pub fn create(&self, owner: Owner) -> RegistryResult<Owner> {
        if self.exists(&owner.id) {
            return Err(RegistryError::OwnerAlreadyRegistered(owner.id));
        }
        let value = serde_json::to_vec(&owner)?;
        self.store.put(owner_key(&owner.id).into_bytes(), value);
        Ok(owner)
    }

    /// Whether an owner with this id is stored
    pub fn exists(&self, owner_id: &str) -> bool {
        self.store.get(owner_key(owner_id).as_bytes()).is_some()
    }

    /// Load an owner by id
    pub fn get(&self, owner_id: &str) -> RegistryResult<Owner> {
        let bytes = self
            .store
            .get(owner_key(owner_id).as_bytes())
            .ok_or_else(|| RegistryError::OwnerNotFound(owner_id.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// All owners with their state keys, in store key order.
    ///
    /// Key order is lexicographic by id, not insertion or numeric order.
    pub fn list(&self) -> RegistryResult<Vec<(String, Owner)>> {
        let mut owners = Vec::new();
        for (key, value) in self.store.scan_prefix(OWNER_KEY_PREFIX.as_bytes()) {
            let key = String::from_utf8(key).map_err(|_| RegistryError::MalformedKey)?;
            let owner: Owner = serde_json::from_slice(&value)?;
            owners.push((key, owner));
        }
        Ok(owners)
    }
}
