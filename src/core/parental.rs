//! Parental notification settings and the large-expense alert rule.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::{Error, Result},
    models::{Transaction, TransactionKind},
};

/// What parents are told about, and where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParentalSettings {
    /// Parent's email; empty when not set
    pub parent_email: String,
    /// Parent's phone; empty when not set
    pub parent_phone: String,
    /// Send a daily income and expense report
    pub daily_report: bool,
    /// Send a weekly summary report
    pub weekly_report: bool,
    /// Notify immediately on large expenses
    pub alert_on_large_expense: bool,
    /// Expenses above this amount are large
    pub expense_threshold: f64,
}

impl Default for ParentalSettings {
    fn default() -> Self {
        Self {
            parent_email: String::new(),
            parent_phone: String::new(),
            daily_report: true,
            weekly_report: true,
            alert_on_large_expense: true,
            expense_threshold: 50.0,
        }
    }
}

/// Where an alert is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    /// Email to this address
    Email(String),
    /// Text message to this number
    Phone(String),
}

/// A notification about one large expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseAlert {
    /// The expense that triggered it
    pub transaction_id: u64,
    /// Its amount
    pub amount: f64,
    /// Threshold it exceeded
    pub threshold: f64,
    /// Configured contacts; empty if none are set
    pub channels: Vec<Channel>,
}

impl ParentalSettings {
    /// Checks the contact and threshold fields.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for a malformed email or a negative or
    /// non-finite threshold.
    pub fn validate(&self) -> Result<()> {
        let email = self.parent_email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            return Err(Error::Config {
                message: format!("Parent email '{email}' is not a valid address"),
            });
        }
        if !self.expense_threshold.is_finite() || self.expense_threshold < 0.0 {
            return Err(Error::Config {
                message: format!(
                    "Expense threshold {} must be a non-negative number",
                    self.expense_threshold
                ),
            });
        }
        Ok(())
    }

    /// Replaces these settings with `updated` if it validates.
    ///
    /// # Errors
    /// As [`ParentalSettings::validate`]; the current settings are kept on error.
    pub fn save(&mut self, updated: Self) -> Result<()> {
        updated.validate()?;
        info!(
            "Parental settings saved (alerts: {}, threshold: {:.2})",
            updated.alert_on_large_expense, updated.expense_threshold
        );
        *self = updated;
        Ok(())
    }

    /// Contacts that are filled in.
    #[must_use]
    pub fn channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if !self.parent_email.trim().is_empty() {
            channels.push(Channel::Email(self.parent_email.trim().to_string()));
        }
        if !self.parent_phone.trim().is_empty() {
            channels.push(Channel::Phone(self.parent_phone.trim().to_string()));
        }
        channels
    }

    /// Alert for `transaction` if it is an expense strictly above the threshold
    /// and alerts are enabled.
    #[must_use]
    pub fn alert_for(&self, transaction: &Transaction) -> Option<ExpenseAlert> {
        let large = transaction.kind == TransactionKind::Expense
            && transaction.amount > self.expense_threshold;
        (self.alert_on_large_expense && large).then(|| ExpenseAlert {
            transaction_id: transaction.id,
            amount: transaction.amount,
            threshold: self.expense_threshold,
            channels: self.channels(),
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{models::Category, test_utils::date};

    fn expense(id: u64, amount: f64) -> Transaction {
        Transaction {
            id,
            kind: TransactionKind::Expense,
            amount,
            category: Category::Shopping,
            description: String::new(),
            date: date(2025, 12, 1),
        }
    }

    #[test]
    fn test_alert_only_strictly_above_threshold() {
        let settings = ParentalSettings::default();
        assert!(settings.alert_for(&expense(1, 50.0)).is_none());
        let alert = settings.alert_for(&expense(2, 50.01)).unwrap();
        assert_eq!(alert.transaction_id, 2);
        assert_eq!(alert.threshold, 50.0);
        assert!(alert.channels.is_empty());
    }

    #[test]
    fn test_no_alert_for_income_or_when_disabled() {
        let mut income = expense(1, 500.0);
        income.kind = TransactionKind::Income;
        let settings = ParentalSettings::default();
        assert!(settings.alert_for(&income).is_none());

        let quiet = ParentalSettings {
            alert_on_large_expense: false,
            ..ParentalSettings::default()
        };
        assert!(quiet.alert_for(&expense(2, 500.0)).is_none());
    }

    #[test]
    fn test_alert_lists_configured_channels() {
        let settings = ParentalSettings {
            parent_email: " mom@example.com ".to_string(),
            parent_phone: "+994 50 000 00 00".to_string(),
            ..ParentalSettings::default()
        };
        let alert = settings.alert_for(&expense(3, 80.0)).unwrap();
        assert_eq!(
            alert.channels,
            vec![
                Channel::Email("mom@example.com".to_string()),
                Channel::Phone("+994 50 000 00 00".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_email_and_threshold() {
        let mut settings = ParentalSettings::default();
        assert!(settings.validate().is_ok());

        for bad in ["parent", "@example.com", "a@b", "a@.com", "a@b@c.com"] {
            settings.parent_email = bad.to_string();
            assert!(
                matches!(settings.validate().unwrap_err(), Error::Config { message: _ }),
                "{bad} should be rejected"
            );
        }

        settings.parent_email = "dad@mail.az".to_string();
        settings.expense_threshold = -1.0;
        assert!(matches!(
            settings.validate().unwrap_err(),
            Error::Config { message: _ }
        ));
    }

    #[test]
    fn test_save_keeps_old_settings_on_error() {
        let mut settings = ParentalSettings::default();
        let bad = ParentalSettings {
            expense_threshold: f64::NAN,
            ..ParentalSettings::default()
        };
        assert!(settings.save(bad).is_err());
        assert_eq!(settings.expense_threshold, 50.0);

        let good = ParentalSettings {
            expense_threshold: 20.0,
            ..ParentalSettings::default()
        };
        settings.save(good).unwrap();
        assert_eq!(settings.expense_threshold, 20.0);
    }
}
