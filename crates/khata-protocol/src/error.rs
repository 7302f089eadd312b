use khata_drawer::DrawerError;
use khata_ledger::LedgerError;
use khata_store::StoreError;
use khata_types::{CustomerId, Money};

/// Input rejected before any persistence attempt. No state changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("customer name must not be empty")]
    EmptyName,

    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Money),

    #[error("customer {0} not found")]
    UnknownCustomer(CustomerId),
}

/// Errors surfaced at the operation boundary.
///
/// Every operation converts its failure into one user-visible notification;
/// callers see only these aggregate kinds, never per-step detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("due ledger persistence failed: {0}")]
    Store(#[from] StoreError),

    #[error("cash drawer persistence failed: {0}")]
    Drawer(#[from] DrawerError),

    #[error("ledger rejected the mutation: {0}")]
    Ledger(#[from] LedgerError),

    /// A multi-step operation committed its first persistence step, its
    /// second step failed, and the compensating action failed too. The two
    /// ledgers disagree until the reconciler repairs them.
    #[error("ledgers diverged for customer {customer}: {detail}")]
    Drift { customer: CustomerId, detail: String },
}
