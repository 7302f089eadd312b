use khata_types::CustomerId;

/// Errors produced by due-ledger stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("customer {0} not found")]
    UnknownCustomer(CustomerId),

    #[error("store I/O error: {0}")]
    Io(String),

    #[error("store serialization error: {0}")]
    Serialization(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;
