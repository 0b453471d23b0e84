use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::records::Transaction;
use crate::traits::LedgerReader;

/// Result of replaying the history against the recorded balance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub transaction_count: usize,
    pub recorded_balance: f64,
    pub replayed_balance: f64,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// Returns `true` if all checks passed.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific inconsistency found during an audit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Position in the history (0-based), if the violation is tied to one.
    pub index: Option<usize>,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    DuplicateId,
    NonPositiveAmount,
    TimestampRegression,
    NegativeBalance,
    BalanceMismatch,
}

/// Replays a ledger's history from zero and checks its invariants.
pub struct Auditor;

impl Auditor {
    pub fn audit<R: LedgerReader>(reader: &R) -> Result<AuditReport, LedgerError> {
        let transactions = reader.transactions()?;
        let recorded = reader.balance()?.balance;

        let mut report = Self::replay(&transactions);
        report.recorded_balance = recorded;

        // A write may land between the two reads; only compare when the
        // history still matches the balance snapshot.
        if reader.transaction_count()? == transactions.len()
            && report.replayed_balance != recorded
        {
            report.violations.push(Violation {
                index: None,
                kind: ViolationKind::BalanceMismatch,
                description: format!(
                    "recorded balance {recorded} differs from replayed {}",
                    report.replayed_balance
                ),
            });
        }

        if !report.is_clean() {
            tracing::warn!(
                violations = report.violations.len(),
                "ledger audit found violations"
            );
        }
        Ok(report)
    }

    /// Check a history on its own, without a recorded balance to compare.
    pub fn replay(transactions: &[Transaction]) -> AuditReport {
        let mut violations = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut balance = 0.0;

        for (index, tx) in transactions.iter().enumerate() {
            if !seen_ids.insert(tx.id.clone()) {
                violations.push(Violation {
                    index: Some(index),
                    kind: ViolationKind::DuplicateId,
                    description: format!("id {} appears more than once", tx.id),
                });
            }

            if !(tx.amount.is_finite() && tx.amount > 0.0) {
                violations.push(Violation {
                    index: Some(index),
                    kind: ViolationKind::NonPositiveAmount,
                    description: format!("amount {} is not a positive number", tx.amount),
                });
            }

            if index > 0 && tx.timestamp < transactions[index - 1].timestamp {
                violations.push(Violation {
                    index: Some(index),
                    kind: ViolationKind::TimestampRegression,
                    description: "timestamp precedes the previous transaction".into(),
                });
            }

            balance += tx.signed_amount();
            if balance < 0.0 {
                violations.push(Violation {
                    index: Some(index),
                    kind: ViolationKind::NegativeBalance,
                    description: format!("balance dropped to {balance}"),
                });
            }
        }

        AuditReport {
            transaction_count: transactions.len(),
            recorded_balance: balance,
            replayed_balance: balance,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::amount::Amount;
    use crate::memory::InMemoryLedger;
    use crate::records::{TransactionId, TransactionKind};
    use crate::traits::LedgerWriter;

    fn tx(kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            kind,
            amount,
            description: kind.default_description().into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn live_ledger_audits_clean() {
        let ledger = InMemoryLedger::new();
        for v in [0.1, 0.2, 0.3] {
            ledger.record_deposit(Amount::new(v).unwrap(), None).unwrap();
        }
        ledger.record_withdrawal(Amount::new(0.25).unwrap(), None).unwrap();

        let report = Auditor::audit(&ledger).unwrap();
        assert!(report.is_clean(), "{:?}", report.violations);
        assert_eq!(report.transaction_count, 4);
        assert_eq!(report.recorded_balance, report.replayed_balance);
    }

    #[test]
    fn detects_overdrawn_history() {
        let history = vec![
            tx(TransactionKind::Deposit, 10.0),
            tx(TransactionKind::Withdrawal, 20.0),
        ];
        let report = Auditor::replay(&history);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::NegativeBalance);
        assert_eq!(report.violations[0].index, Some(1));
    }

    #[test]
    fn detects_duplicate_ids_and_time_regression() {
        let first = tx(TransactionKind::Deposit, 10.0);
        let mut second = first.clone();
        second.timestamp = first.timestamp - Duration::seconds(5);

        let report = Auditor::replay(&[first, second]);
        let kinds: Vec<_> = report.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::DuplicateId, ViolationKind::TimestampRegression]
        );
    }

    #[test]
    fn detects_non_positive_amounts() {
        let report = Auditor::replay(&[tx(TransactionKind::Deposit, 0.0)]);
        assert_eq!(report.violations[0].kind, ViolationKind::NonPositiveAmount);
    }
}
