use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a due-ledger transaction.
///
/// Serialized as `"DUE"` / `"ADD"`; the on-disk vocabulary is a wire
/// contract shared with the cash drawer's note tags and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    /// Goods handed out on credit; the customer owes more.
    #[serde(rename = "DUE")]
    Due,
    /// Payment received; the customer owes less.
    #[serde(rename = "ADD")]
    Add,
}

impl LogKind {
    /// Returns `true` for a debt increase.
    pub fn is_due(&self) -> bool {
        matches!(self, Self::Due)
    }

    /// Returns `true` for a payment.
    pub fn is_payment(&self) -> bool {
        matches!(self, Self::Add)
    }

    /// The cash-drawer movement paired with this transaction kind.
    ///
    /// New debt means goods left the shop without payment (a withdrawal
    /// effect on the till); a payment received is a deposit.
    pub fn drawer_direction(&self) -> CashDirection {
        match self {
            Self::Due => CashDirection::Withdraw,
            Self::Add => CashDirection::Add,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Due => write!(f, "DUE"),
            Self::Add => write!(f, "ADD"),
        }
    }
}

/// Direction of a cash drawer movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashDirection {
    /// Money (or goods value) leaving the till.
    #[serde(rename = "WITHDRAW")]
    Withdraw,
    /// Money coming into the till.
    #[serde(rename = "ADD")]
    Add,
}

impl fmt::Display for CashDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Withdraw => write!(f, "WITHDRAW"),
            Self::Add => write!(f, "ADD"),
        }
    }
}
