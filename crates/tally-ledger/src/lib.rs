//! Balance and transaction bookkeeping for Tally.
//!
//! This crate is the core of the service. It provides:
//! - Validated [`Amount`]s and immutable [`Transaction`] records
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - `InMemoryLedger`, the lock-guarded implementation used by the server
//! - Derived statistics and a replay-based audit of the balance invariant

pub mod amount;
pub mod audit;
pub mod error;
pub mod memory;
pub mod records;
pub mod stats;
pub mod traits;

pub use amount::Amount;
pub use audit::{AuditReport, Auditor, Violation, ViolationKind};
pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use records::{
    Balance, Page, PageRequest, Receipt, Transaction, TransactionId, TransactionKind, CURRENCY,
};
pub use stats::LedgerStats;
pub use traits::{LedgerReader, LedgerWriter};
