/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: f64, available: f64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("transaction not found: {0}")]
    NotFound(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Returns `true` for failures caused by caller input rather than a
    /// fault inside the ledger.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::LockPoisoned)
    }
}
