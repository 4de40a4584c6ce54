//! Ledger business logic - income and expense tracking.
//!
//! Entries are validated on the way in: amounts must be positive and the
//! category must belong to the set of the transaction's kind. The newest
//! entry is listed first.

use chrono::NaiveDate;
use tracing::info;

use crate::{
    errors::{Error, Result},
    models::{Category, Transaction, TransactionKind},
};

/// Form input for a new ledger entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Income or expense
    pub kind: TransactionKind,
    /// Positive amount
    pub amount: f64,
    /// Category from the kind's set
    pub category: Category,
    /// Free text, may be empty
    pub description: String,
    /// Day of the transaction
    pub date: NaiveDate,
}

/// Totals shown on the tracker's summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerSummary {
    /// Sum of income amounts
    pub total_income: f64,
    /// Sum of expense amounts
    pub total_expense: f64,
    /// Income minus expense
    pub balance: f64,
}

/// In-memory list of transactions.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Transaction>,
    next_id: u64,
}

impl Ledger {
    /// Empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Ledger holding the demo entries shown on first launch.
    #[must_use]
    pub fn with_sample_entries() -> Self {
        let mut ledger = Self::new();
        let samples = [
            (TransactionKind::Income, 100.0, Category::Allowance, "Weekly allowance", 25),
            (TransactionKind::Expense, 25.0, Category::Food, "Lunch", 26),
            (TransactionKind::Income, 50.0, Category::Gift, "Birthday gift", 27),
        ];
        for (kind, amount, category, description, day) in samples {
            if let Some(date) = NaiveDate::from_ymd_opt(2025, 11, day) {
                ledger.insert(kind, amount, category, description.to_string(), date);
            }
        }
        ledger
    }

    /// Validates and records a transaction.
    ///
    /// # Errors
    /// Returns [`Error::InvalidAmount`] for a non-positive or non-finite amount
    /// and [`Error::InvalidCategory`] if the category is not allowed for the kind.
    pub fn record(&mut self, input: NewTransaction) -> Result<&Transaction> {
        if !input.amount.is_finite() || input.amount <= 0.0 {
            return Err(Error::InvalidAmount {
                amount: input.amount,
            });
        }
        if !input.category.allowed_for(input.kind) {
            return Err(Error::InvalidCategory {
                category: input.category.to_string(),
                kind: input.kind.to_string(),
            });
        }
        Ok(self.insert(
            input.kind,
            input.amount,
            input.category,
            input.description.trim().to_string(),
            input.date,
        ))
    }

    fn insert(
        &mut self,
        kind: TransactionKind,
        amount: f64,
        category: Category,
        description: String,
        date: NaiveDate,
    ) -> &Transaction {
        // ids start at 1 even for a `Default` ledger
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        info!("Recorded {} of {:.2} ({}) on {}", kind, amount, category, date);
        self.entries.insert(
            0,
            Transaction {
                id,
                kind,
                amount,
                category,
                description,
                date,
            },
        );
        &self.entries[0]
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    fn total(&self, kind: TransactionKind) -> f64 {
        self.entries
            .iter()
            .filter(|t| t.kind == kind)
            .fold(0.0, |acc, t| acc + t.amount)
    }

    /// Sum of income amounts.
    #[must_use]
    pub fn total_income(&self) -> f64 {
        self.total(TransactionKind::Income)
    }

    /// Sum of expense amounts.
    #[must_use]
    pub fn total_expense(&self) -> f64 {
        self.total(TransactionKind::Expense)
    }

    /// Income minus expense.
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expense()
    }

    /// All three summary figures.
    #[must_use]
    pub fn summary(&self) -> LedgerSummary {
        let total_income = self.total_income();
        let total_expense = self.total_expense();
        LedgerSummary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::date;

    fn entry(kind: TransactionKind, amount: f64, category: Category) -> NewTransaction {
        NewTransaction {
            kind,
            amount,
            category,
            description: "test".to_string(),
            date: date(2025, 11, 28),
        }
    }

    #[test]
    fn test_record_rejects_non_positive_amounts() {
        let mut ledger = Ledger::new();
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = ledger.record(entry(TransactionKind::Income, amount, Category::Gift));
            assert!(matches!(
                result.unwrap_err(),
                Error::InvalidAmount { amount: _ }
            ));
        }
        assert!(ledger.entries().is_empty());
    }

    #[test]
    fn test_record_rejects_category_of_other_kind() {
        let mut ledger = Ledger::new();
        let err = ledger
            .record(entry(TransactionKind::Expense, 10.0, Category::Salary))
            .unwrap_err();
        match err {
            Error::InvalidCategory { category, kind } => {
                assert_eq!(category, "salary");
                assert_eq!(kind, "expense");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(
            ledger
                .record(entry(TransactionKind::Income, 10.0, Category::Food))
                .is_err()
        );
        assert!(
            ledger
                .record(entry(TransactionKind::Expense, 10.0, Category::Other))
                .is_ok()
        );
    }

    #[test]
    fn test_newest_entry_first_with_unique_ids() {
        let mut ledger = Ledger::default();
        ledger
            .record(entry(TransactionKind::Income, 10.0, Category::Allowance))
            .unwrap();
        ledger
            .record(entry(TransactionKind::Expense, 4.0, Category::Transport))
            .unwrap();
        let ids: Vec<u64> = ledger.entries().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(ledger.entries()[0].category, Category::Transport);
    }

    #[test]
    fn test_missing_kind_totals_to_positive_zero() {
        let mut ledger = Ledger::new();
        ledger
            .record(entry(TransactionKind::Expense, 30.0, Category::Food))
            .unwrap();
        let income = ledger.total_income();
        assert_eq!(income, 0.0);
        assert!(income.is_sign_positive());
        assert_eq!(crate::shell::render::money(income), "₼0.00");
        assert_eq!(crate::shell::render::money(Ledger::new().balance()), "₼0.00");
    }

    #[test]
    fn test_sample_totals() {
        let ledger = Ledger::with_sample_entries();
        let summary = ledger.summary();
        assert_eq!(summary.total_income, 150.0);
        assert_eq!(summary.total_expense, 25.0);
        assert_eq!(summary.balance, 125.0);
        assert_eq!(ledger.balance(), 125.0);
    }
}
