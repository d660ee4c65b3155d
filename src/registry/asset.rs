//! Asset registry

use crate::state::{StateBatch, StateStore};

use super::error::{RegistryError, RegistryResult};
use super::model::{asset_key, Asset, ASSET_KEY_PREFIX};

/// CRUD over Asset records, keyed by asset id
///
/// Stores records unconditionally; uniqueness and owner-existence rules
/// belong to the transfer workflow.
pub struct AssetRegistry<'a> {
    store: &'a StateStore,
}

impl<'a> AssetRegistry<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self { store }
    }

    /// Store or overwrite an asset record
    pub fn register(&self, asset: &Asset) -> RegistryResult<()> {
        let value = serde_json::to_vec(asset)?;
        self.store.put(asset_key(&asset.id).into_bytes(), value);
        Ok(())
    }

    /// Stage a store/overwrite of an asset record into a batch
    pub fn stage_register(&self, batch: &mut StateBatch, asset: &Asset) -> RegistryResult<()> {
        let value = serde_json::to_vec(asset)?;
        batch.put(asset_key(&asset.id).into_bytes(), value);
        Ok(())
    }

    /// Whether an asset with this id is stored
    pub fn exists(&self, asset_id: &str) -> bool {
        self.store.get(asset_key(asset_id).as_bytes()).is_some()
    }

    /// Load an asset by id
    pub fn get(&self, asset_id: &str) -> RegistryResult<Asset> {
        let bytes = self
            .store
            .get(asset_key(asset_id).as_bytes())
            .ok_or_else(|| RegistryError::AssetNotFound(asset_id.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Load an asset by its full state key (as recorded in index entries)
    pub(crate) fn get_by_state_key(&self, state_key: &str) -> RegistryResult<Asset> {
        let asset_id = state_key
            .strip_prefix(ASSET_KEY_PREFIX)
            .ok_or(RegistryError::MalformedKey)?;
        self.get(asset_id)
    }

    /// All assets, in store key order (lexicographic by id)
    pub fn list(&self) -> RegistryResult<Vec<Asset>> {
        let mut assets = Vec::new();
        for (_, value) in self.store.scan_prefix(ASSET_KEY_PREFIX.as_bytes()) {
            assets.push(serde_json::from_slice(&value)?);
        }
        Ok(assets)
    }

    /// Flip the sellable flag on a stored asset
    pub fn set_sellable(&self, asset_id: &str, sellable: bool) -> RegistryResult<Asset> {
        let mut asset = self.get(asset_id)?;
        asset.sellable = sellable;
        self.register(&asset)?;
        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, owner_id: &str) -> Asset {
        Asset {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            price: "250000".into(),
            bed_count: 3,
            bath_count: 2,
            lot_size: "0.25".into(),
            full_address: "1 Main St, Springfield, IL 62704".into(),
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62704".into(),
            house_size: "1400".into(),
            sellable: false,
        }
    }

    #[test]
    fn test_register_and_get() {
        let store = StateStore::new_memory();
        let registry = AssetRegistry::new(&store);

        assert!(!registry.exists("0"));
        registry.register(&asset("0", "7")).unwrap();
        assert!(registry.exists("0"));
        assert_eq!(registry.get("0").unwrap(), asset("0", "7"));
    }

    #[test]
    fn test_register_overwrites() {
        let store = StateStore::new_memory();
        let registry = AssetRegistry::new(&store);
        registry.register(&asset("0", "7")).unwrap();
        registry.register(&asset("0", "8")).unwrap();
        assert_eq!(registry.get("0").unwrap().owner_id, "8");
    }

    #[test]
    fn test_set_sellable() {
        let store = StateStore::new_memory();
        let registry = AssetRegistry::new(&store);
        registry.register(&asset("0", "7")).unwrap();

        let updated = registry.set_sellable("0", true).unwrap();
        assert!(updated.sellable);
        assert!(registry.get("0").unwrap().sellable);

        assert!(matches!(
            registry.set_sellable("404", true),
            Err(RegistryError::AssetNotFound(id)) if id == "404"
        ));
    }

    #[test]
    fn test_list_spans_wide_ids() {
        let store = StateStore::new_memory();
        let registry = AssetRegistry::new(&store);
        for id in ["5", "50", "500", "5000"] {
            registry.register(&asset(id, "7")).unwrap();
        }
        let ids: Vec<String> = registry.list().unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["5", "50", "500", "5000"]);
    }

    #[test]
    fn test_get_by_state_key() {
        let store = StateStore::new_memory();
        let registry = AssetRegistry::new(&store);
        registry.register(&asset("0", "7")).unwrap();
        assert_eq!(registry.get_by_state_key("REALESTATE_0").unwrap().id, "0");
        assert!(matches!(
            registry.get_by_state_key("WRONGPREFIX_0"),
            Err(RegistryError::MalformedKey)
        ));
    }
}
