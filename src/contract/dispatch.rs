//! Operation dispatch
//!
//! Maps an operation name and its positional string arguments onto the
//! registry, the way the hosting ledger hands an invocation to this
//! contract. Success payloads are the JSON wire values; every failure
//! surfaces as a [`RegistryError`] with a human-readable message.

use serde_json::json;
use tracing::debug;

use crate::registry::{
    parse_bool_flag, Asset, AssetRegistry, Owner, OwnerRegistry, OwnershipIndex, ProvenanceLedger,
    RegistryError, RegistryResult, TransferWorkflow,
};
use crate::state::StateStore;

fn expect_args(args: &[String], expected: usize) -> RegistryResult<()> {
    if args.len() != expected {
        return Err(RegistryError::BadArgumentCount {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn bool_payload(value: bool) -> Vec<u8> {
    if value { b"true".to_vec() } else { b"false".to_vec() }
}

/// The registry contract: one `invoke` per hosted invocation
pub struct RegistryContract {
    store: StateStore,
}

impl RegistryContract {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Direct access to the underlying store
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Dispatch one invocation.
    ///
    /// Supported operations and their argument lists:
    ///
    /// - `RegisterOwner(id, name, tax_id, phone, email)` -> JSON Owner
    /// - `OwnerExists(id)` -> `true`/`false`
    /// - `GetOwnerById(id)` -> JSON Owner, empty when absent
    /// - `ListOwners()` -> JSON array of `{key, record}`
    /// - `RegisterAsset(13 asset fields)` -> JSON Asset
    /// - `AssetExists(id)` -> `true`/`false`
    /// - `GetAssetById(id)` -> JSON Asset
    /// - `ListAssets()` -> JSON array of Asset
    /// - `GetAssetsByOwner(owner_id)` -> JSON array of Asset
    /// - `ChangeOwner(asset_id, new_owner_id)` -> empty
    /// - `SetSellable(asset_id, "true"|"false")` -> JSON Asset
    /// - `GetHistoryByAsset(asset_id)` -> JSON array of HistoryRecord
    pub fn invoke(&self, operation: &str, args: &[String]) -> RegistryResult<Vec<u8>> {
        debug!(operation, arg_count = args.len(), "invoke");

        let owners = OwnerRegistry::new(&self.store);
        let assets = AssetRegistry::new(&self.store);
        let index = OwnershipIndex::new(&self.store);
        let ledger = ProvenanceLedger::new(&self.store);
        let workflow = TransferWorkflow::new(&self.store);

        match operation {
            "RegisterOwner" => {
                let owner = owners.create(Owner::from_args(args)?)?;
                Ok(serde_json::to_vec(&owner)?)
            }
            "OwnerExists" => {
                expect_args(args, 1)?;
                Ok(bool_payload(owners.exists(&args[0])))
            }
            "GetOwnerById" => {
                expect_args(args, 1)?;
                match owners.get(&args[0]) {
                    Ok(owner) => Ok(serde_json::to_vec(&owner)?),
                    // Historical wire behavior: an absent owner is an
                    // empty payload, not an error.
                    Err(RegistryError::OwnerNotFound(_)) => Ok(Vec::new()),
                    Err(err) => Err(err),
                }
            }
            "ListOwners" => {
                expect_args(args, 0)?;
                let entries: Vec<_> = owners
                    .list()?
                    .into_iter()
                    .map(|(key, record)| json!({ "key": key, "record": record }))
                    .collect();
                Ok(serde_json::to_vec(&entries)?)
            }
            "RegisterAsset" => {
                let asset = workflow.register(Asset::from_args(args)?)?;
                Ok(serde_json::to_vec(&asset)?)
            }
            "AssetExists" => {
                expect_args(args, 1)?;
                Ok(bool_payload(assets.exists(&args[0])))
            }
            "GetAssetById" => {
                expect_args(args, 1)?;
                Ok(serde_json::to_vec(&assets.get(&args[0])?)?)
            }
            "ListAssets" => {
                expect_args(args, 0)?;
                Ok(serde_json::to_vec(&assets.list()?)?)
            }
            "GetAssetsByOwner" => {
                expect_args(args, 1)?;
                Ok(serde_json::to_vec(&index.assets_owned_by(&args[0], &assets)?)?)
            }
            "ChangeOwner" => {
                expect_args(args, 2)?;
                workflow.change_owner(&args[0], &args[1])?;
                Ok(Vec::new())
            }
            "SetSellable" => {
                expect_args(args, 2)?;
                let sellable = parse_bool_flag("sellable", &args[1])?;
                Ok(serde_json::to_vec(&workflow.set_sellable(&args[0], sellable)?)?)
            }
            "GetHistoryByAsset" => {
                expect_args(args, 1)?;
                Ok(serde_json::to_vec(&index.owners_of_asset(&args[0], &ledger)?)?)
            }
            other => Err(RegistryError::UnknownOperation(other.to_string())),
        }
    }
}
