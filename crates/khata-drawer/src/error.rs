/// Errors produced by drawer stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawerError {
    #[error("drawer I/O error: {0}")]
    Io(String),

    #[error("drawer serialization error: {0}")]
    Serialization(String),

    #[error("drawer store lock poisoned")]
    LockPoisoned,
}

pub type DrawerResult<T> = Result<T, DrawerError>;
