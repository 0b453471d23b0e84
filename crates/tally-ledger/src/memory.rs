use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::amount::Amount;
use crate::error::LedgerError;
use crate::records::{
    Balance, Page, PageRequest, Receipt, Transaction, TransactionId, TransactionKind,
};
use crate::traits::{LedgerReader, LedgerWriter};

/// In-memory ledger holding one balance and its append-only history.
///
/// All state sits behind a single `RwLock`. Recording operations hold the
/// write lock across validation, append and balance update, so no reader
/// ever sees a half-applied transaction.
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    transactions: Vec<Transaction>,
    id_index: HashMap<String, usize>,
    balance: f64,
}

impl LedgerState {
    fn append(
        &mut self,
        kind: TransactionKind,
        amount: Amount,
        description: Option<&str>,
    ) -> Transaction {
        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(kind.default_description())
            .to_string();

        let transaction = Transaction {
            id: TransactionId::new(),
            kind,
            amount: amount.value(),
            description,
            timestamp: next_timestamp(self.transactions.last()),
        };

        self.id_index
            .insert(transaction.id.to_string(), self.transactions.len());
        self.transactions.push(transaction.clone());
        transaction
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
        }
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerWriter for InMemoryLedger {
    fn record_deposit(
        &self,
        amount: Amount,
        description: Option<&str>,
    ) -> Result<Receipt, LedgerError> {
        let mut state = self.write_state()?;

        let transaction = state.append(TransactionKind::Deposit, amount, description);
        state.balance += transaction.signed_amount();
        let new_balance = state.balance;

        tracing::info!(
            id = %transaction.id,
            amount = transaction.amount,
            new_balance,
            "deposit recorded"
        );

        Ok(Receipt {
            transaction,
            new_balance,
        })
    }

    fn record_withdrawal(
        &self,
        amount: Amount,
        description: Option<&str>,
    ) -> Result<Receipt, LedgerError> {
        let mut state = self.write_state()?;

        let available = state.balance;
        let requested = amount.value();
        if requested > available {
            tracing::warn!(requested, available, "withdrawal rejected: insufficient funds");
            return Err(LedgerError::InsufficientFunds {
                requested,
                available,
            });
        }

        let transaction = state.append(TransactionKind::Withdrawal, amount, description);
        state.balance += transaction.signed_amount();
        let new_balance = state.balance;

        tracing::info!(
            id = %transaction.id,
            amount = transaction.amount,
            new_balance,
            "withdrawal recorded"
        );

        Ok(Receipt {
            transaction,
            new_balance,
        })
    }
}

impl LedgerReader for InMemoryLedger {
    fn balance(&self) -> Result<Balance, LedgerError> {
        let state = self.read_state()?;
        Ok(Balance::usd(state.balance))
    }

    fn list_transactions(&self, page: PageRequest) -> Result<Page, LedgerError> {
        let state = self.read_state()?;
        let total = state.transactions.len();

        let start = page.offset.min(total);
        let end = start.saturating_add(page.limit).min(total);

        Ok(Page {
            transactions: state.transactions[start..end].to_vec(),
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    fn get_transaction(&self, id: &str) -> Result<Transaction, LedgerError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "transaction id is required".into(),
            ));
        }

        let state = self.read_state()?;
        state
            .id_index
            .get(id)
            .and_then(|&index| state.transactions.get(index))
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    fn transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        let state = self.read_state()?;
        Ok(state.transactions.clone())
    }

    fn transaction_count(&self) -> Result<usize, LedgerError> {
        let state = self.read_state()?;
        Ok(state.transactions.len())
    }
}

/// Current time, clamped so it never precedes the previous transaction.
fn next_timestamp(last: Option<&Transaction>) -> DateTime<Utc> {
    let now = Utc::now();
    match last {
        Some(previous) if previous.timestamp > now => previous.timestamp,
        _ => now,
    }
}
