use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currency every balance is reported in.
pub const CURRENCY: &str = "USD";

/// Unique identifier for a transaction (UUID v7 for time-ordering).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(uuid::Uuid);

impl TransactionId {
    /// Generate a new time-ordered transaction ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Short representation (first 8 characters of UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", self.short_id())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Description used when the caller supplies none.
    pub fn default_description(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Withdrawal => write!(f, "withdrawal"),
        }
    }
}

/// An immutable record of a single deposit or withdrawal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Effect of this transaction on the balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdrawal => -self.amount,
        }
    }
}

/// Outcome of a successful deposit or withdrawal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction: Transaction,
    pub new_balance: f64,
}

/// Current balance with its currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub balance: f64,
    pub currency: String,
}

impl Balance {
    pub fn usd(balance: f64) -> Self {
        Self {
            balance,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Pagination window over the transaction history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: usize = 50;

    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One window of transactions plus the full history length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub transactions: Vec<Transaction>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}
