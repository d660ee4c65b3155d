//! Contract Layer for estatechain
//!
//! The invocation surface: operation-name dispatch over the registry,
//! with argument-count validation and JSON payload assembly.

mod dispatch;

pub use dispatch::RegistryContract;
