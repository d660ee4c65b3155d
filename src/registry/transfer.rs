//! Ownership transfer workflow
//!
//! Orchestrates asset registration and ownership transfer across the
//! owner/asset registries, the ownership index and the provenance
//! ledger. Every invocation stages its writes in a [`StateBatch`] and
//! applies them only after all preconditions have passed, so a failed
//! invocation leaves no partial state.

use tracing::info;

use crate::state::{StateBatch, StateStore};

use super::asset::AssetRegistry;
use super::error::{RegistryError, RegistryResult};
use super::history::{history_key, ProvenanceLedger};
use super::index::OwnershipIndex;
use super::model::Asset;
use super::owner::OwnerRegistry;

/// Registration and ownership-transfer orchestration
pub struct TransferWorkflow<'a> {
    store: &'a StateStore,
    owners: OwnerRegistry<'a>,
    assets: AssetRegistry<'a>,
    index: OwnershipIndex<'a>,
    history: ProvenanceLedger<'a>,
}

impl<'a> TransferWorkflow<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self {
            store,
            owners: OwnerRegistry::new(store),
            assets: AssetRegistry::new(store),
            index: OwnershipIndex::new(store),
            history: ProvenanceLedger::new(store),
        }
    }

    /// Register a new asset under its owner.
    ///
    /// The owner must already be registered and the asset id unused.
    /// Writes the asset record, the first provenance row, and both
    /// index entries in one atomic application.
    pub fn register(&self, asset: Asset) -> RegistryResult<Asset> {
        if !self.owners.exists(&asset.owner_id) {
            return Err(RegistryError::OwnerNotRegistered(asset.owner_id));
        }
        if self.assets.exists(&asset.id) {
            return Err(RegistryError::AssetAlreadyRegistered(asset.id));
        }

        let mut batch = StateBatch::new();
        self.assets.stage_register(&mut batch, &asset)?;
        self.history.append(&mut batch, &asset.id, &asset.owner_id)?;
        self.index
            .add_forward_entry(&mut batch, &asset.owner_id, &asset.id)?;
        self.index.add_reverse_entry(
            &mut batch,
            &asset.id,
            &asset.owner_id,
            &history_key(&asset.id, &asset.owner_id),
        )?;
        self.store.apply(batch);

        info!(asset_id = %asset.id, owner_id = %asset.owner_id, "asset registered");
        Ok(asset)
    }

    /// Transfer a sellable asset to a new owner.
    ///
    /// Clears the sellable flag, retires the previous owner's forward
    /// entry, and appends the new ownership fact to the provenance
    /// ledger and reverse index.
    pub fn change_owner(&self, asset_id: &str, new_owner_id: &str) -> RegistryResult<Asset> {
        let mut asset = self.assets.get(asset_id)?;
        if !asset.sellable {
            return Err(RegistryError::NotOpenForSale(asset_id.to_string()));
        }

        let previous_owner = asset.owner_id.clone();
        let mut batch = StateBatch::new();
        self.index
            .remove_forward_entry(&mut batch, &previous_owner, asset_id)?;

        asset.owner_id = new_owner_id.to_string();
        asset.sellable = false;
        self.assets.stage_register(&mut batch, &asset)?;

        self.history.append(&mut batch, asset_id, new_owner_id)?;
        self.index
            .add_forward_entry(&mut batch, new_owner_id, asset_id)?;
        self.index.add_reverse_entry(
            &mut batch,
            asset_id,
            new_owner_id,
            &history_key(asset_id, new_owner_id),
        )?;
        self.store.apply(batch);

        info!(
            asset_id = %asset_id,
            from = %previous_owner,
            to = %new_owner_id,
            "ownership transferred"
        );
        Ok(asset)
    }

    /// Flip an asset's sellable flag. No index side effects.
    pub fn set_sellable(&self, asset_id: &str, sellable: bool) -> RegistryResult<Asset> {
        self.assets.set_sellable(asset_id, sellable)
    }
}
