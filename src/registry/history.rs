//! Provenance ledger
//!
//! Append-only history of (asset, owner) ownership events. Records are
//! keyed by the deterministic concatenation of asset and owner ids, so
//! the reverse index and the ledger always derive the same key.

use crate::state::{StateBatch, StateStore};

use super::error::{RegistryError, RegistryResult};
use super::model::{HistoryRecord, HISTORY_KEY_PREFIX};

/// State key for the history record of one (asset, owner) pair.
///
/// The key carries no event sequence, so a transfer back to a previous
/// owner lands on the same key and overwrites that owner's earlier row.
pub fn history_key(asset_id: &str, owner_id: &str) -> String {
    format!("{}{}{}", HISTORY_KEY_PREFIX, asset_id, owner_id)
}

/// Append-only store of ownership events
pub struct ProvenanceLedger<'a> {
    store: &'a StateStore,
}

impl<'a> ProvenanceLedger<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self { store }
    }

    /// Stage a history record for an ownership event and return it
    pub fn append(
        &self,
        batch: &mut StateBatch,
        asset_id: &str,
        owner_id: &str,
    ) -> RegistryResult<HistoryRecord> {
        let record = HistoryRecord {
            owner_id: owner_id.to_string(),
            asset_id: asset_id.to_string(),
        };
        let value = serde_json::to_vec(&record)?;
        batch.put(history_key(asset_id, owner_id).into_bytes(), value);
        Ok(record)
    }

    /// Load a history record by its full state key (as recorded in
    /// reverse-index entries)
    pub fn get_by_state_key(&self, state_key: &str) -> RegistryResult<HistoryRecord> {
        let bytes = self
            .store
            .get(state_key.as_bytes())
            .ok_or_else(|| RegistryError::HistoryNotFound(state_key.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
