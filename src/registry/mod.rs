//! Registry Layer for estatechain
//!
//! Domain logic over the state layer: owner and asset records, the
//! forward/reverse ownership indexes, the provenance ledger, and the
//! transfer workflow tying them together.

pub mod asset;
pub mod error;
pub mod history;
pub mod index;
pub mod model;
pub mod owner;
pub mod transfer;

pub use asset::AssetRegistry;
pub use error::{ErrorKind, RegistryError, RegistryResult};
pub use history::{history_key, ProvenanceLedger};
pub use index::OwnershipIndex;
pub use model::{
    asset_key, owner_key, parse_bool_flag, Asset, HistoryRecord, Owner, ASSETS_BY_OWNER_INDEX,
    ASSET_KEY_PREFIX, HISTORY_KEY_PREFIX, INDEX_SENTINEL, OWNERS_BY_ASSET_INDEX, OWNER_KEY_PREFIX,
};
pub use owner::OwnerRegistry;
pub use transfer::TransferWorkflow;
