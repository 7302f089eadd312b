use khata_types::LogId;

/// Errors produced by due-ledger mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("log entry {0} already exists in this ledger")]
    DuplicateLogId(LogId),

    #[error("log entry {0} not found in this ledger")]
    UnknownLog(LogId),
}
