//! Plain data records shared by the calendar and the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::{Error, Result};

/// Date format used everywhere a date is shown or typed.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [`Error::InvalidDate`] if the input is not a valid calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        input: input.to_string(),
    })
}

/// What a calendar entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Planned money coming in
    Income,
    /// Planned money going out
    Expense,
    /// A savings target date
    Goal,
}

impl EventKind {
    /// Lowercase tag used in commands and config.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Goal => "goal",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "goal" => Ok(Self::Goal),
            other => Err(Error::UnknownCommand {
                input: format!("event type '{other}'"),
            }),
        }
    }
}

/// A dated calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEvent {
    /// Unique identifier, assigned on creation
    pub id: u64,
    /// Short label shown in the grid
    pub title: String,
    /// Income, expense or goal
    pub kind: EventKind,
    /// Optional amount; absent for pure markers
    pub amount: Option<f64>,
    /// Day the event falls on
    pub date: NaiveDate,
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received
    Income,
    /// Money spent
    Expense,
}

impl TransactionKind {
    /// Lowercase tag used in commands.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(Error::UnknownCommand {
                input: format!("transaction type '{other}'"),
            }),
        }
    }
}

/// Ledger category. Which ones are allowed depends on [`TransactionKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Wages from a job
    Salary,
    /// Pocket money
    Allowance,
    /// Money received as a present
    Gift,
    /// Meals and snacks
    Food,
    /// Bus, metro, taxi
    Transport,
    /// Games, cinema, events
    Entertainment,
    /// Books, courses, school supplies
    Education,
    /// Clothes and other purchases
    Shopping,
    /// Anything else; valid for both kinds
    Other,
}

impl Category {
    /// Income categories in display order.
    pub const INCOME: [Self; 4] = [Self::Salary, Self::Allowance, Self::Gift, Self::Other];

    /// Expense categories in display order.
    pub const EXPENSE: [Self; 6] = [
        Self::Food,
        Self::Transport,
        Self::Entertainment,
        Self::Education,
        Self::Shopping,
        Self::Other,
    ];

    /// Lowercase tag used in commands.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Allowance => "allowance",
            Self::Gift => "gift",
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Education => "education",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }

    /// Categories a transaction of `kind` may use.
    #[must_use]
    pub const fn for_kind(kind: TransactionKind) -> &'static [Self] {
        match kind {
            TransactionKind::Income => &Self::INCOME,
            TransactionKind::Expense => &Self::EXPENSE,
        }
    }

    /// Whether this category belongs to the set of `kind`.
    #[must_use]
    pub fn allowed_for(self, kind: TransactionKind) -> bool {
        Self::for_kind(kind).contains(&self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::INCOME
            .iter()
            .chain(Self::EXPENSE.iter())
            .copied()
            .find(|c| c.tag() == lower)
            .ok_or_else(|| Error::InvalidCategory {
                category: s.to_string(),
                kind: "any".to_string(),
            })
    }
}

/// A recorded income or expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned on creation
    pub id: u64,
    /// Income or expense
    pub kind: TransactionKind,
    /// Positive amount
    pub amount: f64,
    /// Category from the kind's set
    pub category: Category,
    /// Free text
    pub description: String,
    /// Day the transaction happened
    pub date: NaiveDate,
}
