//! State Layer for estatechain
//!
//! Ordered key-value storage plus the composite-key codec the secondary
//! indexes are built on.
//!
//! - Point get/put/delete and half-open lexicographic range scans
//! - In-memory mode for tests, sled-backed mode for persistence
//! - Staged write batches for single-invocation atomicity

mod composite;
mod store;

pub use composite::{
    decode_composite_key, encode_composite_key, partial_composite_prefix, prefix_scan_range,
};
pub use store::{StateBatch, StateStore};
