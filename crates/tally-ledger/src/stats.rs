use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::records::{Transaction, TransactionKind};
use crate::traits::LedgerReader;

/// Aggregates derived from the transaction history.
///
/// Always recomputed from a snapshot of the history; nothing here is
/// stored by the ledger.
///
/// `net_flow` is deposits minus withdrawals accumulated in history order,
/// the same recurrence the ledger applies to its balance, so the two agree
/// exactly even when the per-kind totals carry different rounding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    pub total_deposits: f64,
    pub total_withdrawals: f64,
    pub deposit_count: usize,
    pub withdrawal_count: usize,
    pub average_deposit: f64,
    pub average_withdrawal: f64,
    pub net_flow: f64,
}

impl LedgerStats {
    /// Compute stats from the reader's current history.
    pub fn compute<R: LedgerReader>(reader: &R) -> Result<Self, LedgerError> {
        let transactions = reader.transactions()?;
        Ok(Self::from_transactions(&transactions))
    }

    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut stats = Self::default();

        for tx in transactions {
            stats.net_flow += tx.signed_amount();
            match tx.kind {
                TransactionKind::Deposit => {
                    stats.total_deposits += tx.amount;
                    stats.deposit_count += 1;
                }
                TransactionKind::Withdrawal => {
                    stats.total_withdrawals += tx.amount;
                    stats.withdrawal_count += 1;
                }
            }
        }

        stats.average_deposit = average(stats.total_deposits, stats.deposit_count);
        stats.average_withdrawal = average(stats.total_withdrawals, stats.withdrawal_count);
        stats
    }

    pub fn transaction_count(&self) -> usize {
        self.deposit_count + self.withdrawal_count
    }
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::memory::InMemoryLedger;
    use crate::traits::LedgerWriter;

    #[test]
    fn empty_history_has_zero_averages() {
        let stats = LedgerStats::from_transactions(&[]);
        assert_eq!(stats, LedgerStats::default());
        assert_eq!(stats.average_deposit, 0.0);
        assert_eq!(stats.average_withdrawal, 0.0);
    }

    #[test]
    fn averages_by_kind() {
        let ledger = InMemoryLedger::new();
        ledger.record_deposit(Amount::new(100.0).unwrap(), None).unwrap();
        ledger.record_deposit(Amount::new(50.0).unwrap(), None).unwrap();
        ledger.record_withdrawal(Amount::new(30.0).unwrap(), None).unwrap();

        let stats = LedgerStats::compute(&ledger).unwrap();
        assert_eq!(stats.deposit_count, 2);
        assert_eq!(stats.withdrawal_count, 1);
        assert_eq!(stats.average_deposit, 75.0);
        assert_eq!(stats.average_withdrawal, 30.0);
        assert_eq!(stats.net_flow, 120.0);
        assert_eq!(stats.transaction_count(), 3);
    }

    #[test]
    fn net_flow_matches_balance_for_inexact_amounts() {
        let ledger = InMemoryLedger::new();
        for v in [0.1, 0.2, 886.86] {
            ledger.record_deposit(Amount::new(v).unwrap(), None).unwrap();
        }
        ledger.record_withdrawal(Amount::new(307.69).unwrap(), None).unwrap();
        ledger.record_withdrawal(Amount::new(0.3).unwrap(), None).unwrap();

        let stats = LedgerStats::compute(&ledger).unwrap();
        assert_eq!(stats.net_flow, ledger.balance().unwrap().balance);
        assert!((stats.net_flow - (stats.total_deposits - stats.total_withdrawals)).abs() < 1e-9);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(LedgerStats::default()).unwrap();
        assert!(json.get("totalDeposits").is_some());
        assert!(json.get("averageWithdrawal").is_some());
        assert!(json.get("netFlow").is_some());
    }
}
