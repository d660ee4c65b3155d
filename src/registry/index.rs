//! Ownership index
//!
//! Two composite-key projections over the same ownership facts:
//!
//! - Forward: `(owner, asset)` sentinel answering "what does this owner
//!   hold now". Exactly one entry exists per asset, for its current
//!   owner.
//! - Reverse: `(asset, owner, history-key)` sentinel answering "who has
//!   ever owned this asset", one-to-one with provenance records.
//!
//! Only the index keys carry meaning; values are a one-byte sentinel.

use crate::state::{
    decode_composite_key, encode_composite_key, partial_composite_prefix, StateBatch, StateStore,
};

use super::asset::AssetRegistry;
use super::error::{RegistryError, RegistryResult};
use super::history::ProvenanceLedger;
use super::model::{
    asset_key, owner_key, Asset, HistoryRecord, ASSETS_BY_OWNER_INDEX, INDEX_SENTINEL,
    OWNERS_BY_ASSET_INDEX,
};

/// Maintains the forward and reverse ownership indexes
pub struct OwnershipIndex<'a> {
    store: &'a StateStore,
}

impl<'a> OwnershipIndex<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self { store }
    }

    /// Composite key of the forward entry for one (owner, asset) pair
    pub fn forward_key(&self, owner_id: &str, asset_id: &str) -> RegistryResult<Vec<u8>> {
        encode_composite_key(
            ASSETS_BY_OWNER_INDEX,
            &[&owner_key(owner_id), &asset_key(asset_id)],
        )
    }

    /// Stage the forward sentinel for (owner, asset).
    ///
    /// Overwriting an existing entry is fine; only key encoding can fail.
    pub fn add_forward_entry(
        &self,
        batch: &mut StateBatch,
        owner_id: &str,
        asset_id: &str,
    ) -> RegistryResult<()> {
        let key = self.forward_key(owner_id, asset_id)?;
        batch.put(key, INDEX_SENTINEL.to_vec());
        Ok(())
    }

    /// Stage removal of the forward sentinel for (owner, asset).
    ///
    /// A missing entry means the index no longer matches the asset
    /// record, which is corruption, not a benign no-op.
    pub fn remove_forward_entry(
        &self,
        batch: &mut StateBatch,
        owner_id: &str,
        asset_id: &str,
    ) -> RegistryResult<()> {
        let key = self.forward_key(owner_id, asset_id)?;
        if self.store.get(&key).is_none() {
            return Err(RegistryError::IndexEntryMissing {
                owner: owner_id.to_string(),
                asset: asset_id.to_string(),
            });
        }
        batch.delete(key);
        Ok(())
    }

    /// Assets currently held by an owner, in index-key order (by asset
    /// id, not acquisition time)
    pub fn assets_owned_by(
        &self,
        owner_id: &str,
        assets: &AssetRegistry<'_>,
    ) -> RegistryResult<Vec<Asset>> {
        let prefix = partial_composite_prefix(ASSETS_BY_OWNER_INDEX, &[&owner_key(owner_id)])?;
        let mut owned = Vec::new();
        for (key, _) in self.store.scan_prefix(&prefix) {
            let (_, segments) = decode_composite_key(&key)?;
            let asset_state_key = segments.get(1).ok_or(RegistryError::MalformedKey)?;
            owned.push(assets.get_by_state_key(asset_state_key)?);
        }
        Ok(owned)
    }

    /// Stage the reverse sentinel tying (asset, owner) to its history
    /// record key
    pub fn add_reverse_entry(
        &self,
        batch: &mut StateBatch,
        asset_id: &str,
        owner_id: &str,
        history_state_key: &str,
    ) -> RegistryResult<()> {
        let key = encode_composite_key(
            OWNERS_BY_ASSET_INDEX,
            &[&asset_key(asset_id), &owner_key(owner_id), history_state_key],
        )?;
        batch.put(key, INDEX_SENTINEL.to_vec());
        Ok(())
    }

    /// Ownership history of an asset, resolved through the provenance
    /// ledger, in index order
    pub fn owners_of_asset(
        &self,
        asset_id: &str,
        ledger: &ProvenanceLedger<'_>,
    ) -> RegistryResult<Vec<HistoryRecord>> {
        let prefix = partial_composite_prefix(OWNERS_BY_ASSET_INDEX, &[&asset_key(asset_id)])?;
        let mut records = Vec::new();
        for (key, _) in self.store.scan_prefix(&prefix) {
            let (_, segments) = decode_composite_key(&key)?;
            let history_state_key = segments.get(2).ok_or(RegistryError::MalformedKey)?;
            records.push(ledger.get_by_state_key(history_state_key)?);
        }
        Ok(records)
    }
}
