//! Registry errors

/// Coarse error classes surfaced to callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed arguments: wrong count, bad boolean/integer, bad key
    Validation,
    /// A referenced record or index entry is absent
    NotFound,
    /// A registry business rule was violated
    BusinessRule,
    /// The underlying store or serialization failed
    Storage,
}

/// Registry error, one variant per failure condition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("incorrect number of arguments: expected {expected}, got {got}")]
    BadArgumentCount { expected: usize, got: usize },

    #[error("invalid {field}: {value:?}")]
    InvalidArgument { field: &'static str, value: String },

    #[error("invalid contract function name: {0:?}")]
    UnknownOperation(String),

    #[error("malformed composite key")]
    MalformedKey,

    #[error("owner {0} not found")]
    OwnerNotFound(String),

    #[error("asset {0} not found")]
    AssetNotFound(String),

    #[error("history record {0} not found")]
    HistoryNotFound(String),

    #[error("ownership index entry missing for owner {owner}, asset {asset}")]
    IndexEntryMissing { owner: String, asset: String },

    #[error("owner {0} is already registered")]
    OwnerAlreadyRegistered(String),

    #[error("asset {0} is already registered")]
    AssetAlreadyRegistered(String),

    #[error("owner {0} is not registered")]
    OwnerNotRegistered(String),

    #[error("asset {0} is not open to sell")]
    NotOpenForSale(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl RegistryError {
    /// Map a variant onto the four-way error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::BadArgumentCount { .. }
            | RegistryError::InvalidArgument { .. }
            | RegistryError::UnknownOperation(_)
            | RegistryError::MalformedKey => ErrorKind::Validation,
            RegistryError::OwnerNotFound(_)
            | RegistryError::AssetNotFound(_)
            | RegistryError::HistoryNotFound(_)
            | RegistryError::IndexEntryMissing { .. } => ErrorKind::NotFound,
            RegistryError::OwnerAlreadyRegistered(_)
            | RegistryError::AssetAlreadyRegistered(_)
            | RegistryError::OwnerNotRegistered(_)
            | RegistryError::NotOpenForSale(_) => ErrorKind::BusinessRule,
            RegistryError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Storage(err.to_string())
    }
}

impl From<sled::Error> for RegistryError {
    fn from(err: sled::Error) -> Self {
        RegistryError::Storage(err.to_string())
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
