//! # Estatechain
//!
//! A real-estate asset registry over an ordered key-value ledger.
//!
//! ## Core Features
//! - Owner and asset registries over composite-keyed state
//! - Forward index: owner -> assets currently held
//! - Reverse index: asset -> full ownership history
//! - Append-only provenance ledger of ownership events
//! - Sellable-gated ownership-transfer workflow
//! - Batched writes for single-invocation atomicity
//! - In-memory state for tests, sled-backed state for persistence

pub mod contract;
pub mod registry;
pub mod state;

// Re-exports
pub use contract::RegistryContract;
pub use registry::{
    Asset, AssetRegistry, ErrorKind, HistoryRecord, Owner, OwnerRegistry, OwnershipIndex,
    ProvenanceLedger, RegistryError, RegistryResult, TransferWorkflow,
};
pub use state::{StateBatch, StateStore};

/// Estatechain version
pub const ESTATECHAIN_VERSION: &str = "0.1.0";
