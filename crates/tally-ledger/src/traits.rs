use crate::amount::Amount;
use crate::error::LedgerError;
use crate::records::{Balance, Page, PageRequest, Receipt, Transaction};

/// Write boundary: the only way balance and history change.
pub trait LedgerWriter: Send + Sync {
    fn record_deposit(
        &self,
        amount: Amount,
        description: Option<&str>,
    ) -> Result<Receipt, LedgerError>;

    fn record_withdrawal(
        &self,
        amount: Amount,
        description: Option<&str>,
    ) -> Result<Receipt, LedgerError>;
}

/// Read boundary for balance and history queries.
pub trait LedgerReader: Send + Sync {
    fn balance(&self) -> Result<Balance, LedgerError>;

    fn list_transactions(&self, page: PageRequest) -> Result<Page, LedgerError>;

    fn get_transaction(&self, id: &str) -> Result<Transaction, LedgerError>;

    /// Full history, oldest first, taken from one consistent snapshot.
    fn transactions(&self) -> Result<Vec<Transaction>, LedgerError>;

    fn transaction_count(&self) -> Result<usize, LedgerError>;
}
