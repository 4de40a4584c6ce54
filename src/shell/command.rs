//! Typed shell commands and their text parser.
//!
//! One command per line, words separated by whitespace. Free-text tails
//! (event titles, descriptions, questions) keep their inner spacing
//! collapsed to single spaces.

use chrono::NaiveDate;
use std::str::FromStr;

use crate::{
    core::{calendar::NewEvent, invest::RiskLevel, questions::AgeTier},
    errors::{Error, Result},
    locale::Locale,
    models::{Category, EventKind, TransactionKind, parse_date},
};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// List the commands
    Help,
    /// Leave the shell
    Quit,
    /// Switch display language
    Lang(Locale),
    /// Quiz interaction
    Quiz(QuizCommand),
    /// Calendar interaction
    Calendar(CalendarCommand),
    /// Ledger interaction
    Ledger(LedgerCommand),
    /// Savings goal interaction
    Goal(GoalCommand),
    /// Parental settings interaction
    Parent(ParentCommand),
    /// Question for the advisor
    Ask(String),
    /// Investment guide for a risk level
    Invest(RiskLevel),
}

/// `quiz ...` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    /// Tiers and leaderboard
    Tiers,
    /// Start a session
    Start(AgeTier),
    /// Choose an option, zero-based
    Answer(usize),
    /// Buy the hint
    Hint,
    /// Arm the double bonus
    Bonus,
    /// Confirm and move on
    Next,
    /// Back to tier selection
    Reset,
    /// Show score, coins and the current question
    Status,
}

/// `cal ...` subcommands.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCommand {
    /// Draw the viewed month
    Show,
    /// Move one month forward
    Next,
    /// Move one month back
    Prev,
    /// Events on a day of the viewed month
    Day(u32),
    /// Upcoming events from today
    Upcoming,
    /// Add an event
    Add(NewEvent),
}

/// `ledger ...` subcommands.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    /// Record a transaction dated today
    Add {
        /// Income or expense
        kind: TransactionKind,
        /// Amount as typed
        amount: f64,
        /// Category tag
        category: Category,
        /// Optional description
        description: String,
    },
    /// List entries, newest first
    List,
    /// Totals and balance
    Summary,
}

/// `goal ...` subcommands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalCommand {
    /// Show progress
    Show,
    /// Replace the goal
    Set {
        /// Amount to reach
        target: f64,
        /// Amount saved
        current: f64,
        /// Deadline
        deadline: NaiveDate,
    },
}

/// `parent ...` subcommands.
#[derive(Debug, Clone, PartialEq)]
pub enum ParentCommand {
    /// Show the settings
    Show,
    /// Change the large-expense threshold
    Threshold(f64),
    /// Change the parent email
    Email(String),
}

fn unknown(input: impl Into<String>) -> Error {
    Error::UnknownCommand {
        input: input.into(),
    }
}

fn number<T: FromStr>(word: Option<&str>, what: &str) -> Result<T> {
    let word = word.ok_or_else(|| Error::MissingField {
        field: what.to_string(),
    })?;
    word.parse()
        .map_err(|_| unknown(format!("{what} '{word}' is not a number")))
}

fn required<'a>(word: Option<&'a str>, what: &str) -> Result<&'a str> {
    word.ok_or_else(|| Error::MissingField {
        field: what.to_string(),
    })
}

fn rest<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words.collect::<Vec<_>>().join(" ")
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(unknown(""));
        };
        match head.to_ascii_lowercase().as_str() {
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "lang" => Ok(Self::Lang(required(words.next(), "language")?.parse()?)),
            "quiz" => parse_quiz(words).map(Self::Quiz),
            "cal" | "calendar" => parse_calendar(words).map(Self::Calendar),
            "ledger" => parse_ledger(words).map(Self::Ledger),
            "goal" => parse_goal(words).map(Self::Goal),
            "parent" => parse_parent(words).map(Self::Parent),
            "ask" => Ok(Self::Ask(rest(words))),
            "invest" => Ok(Self::Invest(required(words.next(), "risk level")?.parse()?)),
            _ => Err(unknown(line.trim())),
        }
    }
}

fn parse_quiz<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<QuizCommand> {
    match words.next().unwrap_or("status") {
        "tiers" => Ok(QuizCommand::Tiers),
        "start" => Ok(QuizCommand::Start(required(words.next(), "tier")?.parse()?)),
        "answer" => {
            let choice: usize = number(words.next(), "answer")?;
            choice
                .checked_sub(1)
                .map(QuizCommand::Answer)
                .ok_or_else(|| unknown("answers are numbered from 1"))
        }
        "hint" => Ok(QuizCommand::Hint),
        "bonus" => Ok(QuizCommand::Bonus),
        "next" => Ok(QuizCommand::Next),
        "reset" => Ok(QuizCommand::Reset),
        "status" => Ok(QuizCommand::Status),
        other => Err(unknown(format!("quiz {other}"))),
    }
}

fn parse_calendar<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<CalendarCommand> {
    match words.next().unwrap_or("show") {
        "show" => Ok(CalendarCommand::Show),
        "next" => Ok(CalendarCommand::Next),
        "prev" => Ok(CalendarCommand::Prev),
        "day" => Ok(CalendarCommand::Day(number(words.next(), "day")?)),
        "upcoming" => Ok(CalendarCommand::Upcoming),
        "add" => {
            let kind: EventKind = required(words.next(), "event type")?.parse()?;
            let date = parse_date(required(words.next(), "date")?)?;
            let mut words = words.peekable();
            let amount = match words.peek().copied().and_then(|w| w.strip_prefix("amount=")) {
                Some(value) => {
                    let amount = number(Some(value), "amount")?;
                    words.next();
                    Some(amount)
                }
                None => None,
            };
            Ok(CalendarCommand::Add(NewEvent {
                title: rest(words),
                kind,
                amount,
                date,
            }))
        }
        other => Err(unknown(format!("cal {other}"))),
    }
}

fn parse_ledger<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<LedgerCommand> {
    match words.next().unwrap_or("list") {
        "add" => {
            let kind: TransactionKind = required(words.next(), "transaction type")?.parse()?;
            let amount = number(words.next(), "amount")?;
            let category: Category = required(words.next(), "category")?.parse()?;
            Ok(LedgerCommand::Add {
                kind,
                amount,
                category,
                description: rest(words),
            })
        }
        "list" => Ok(LedgerCommand::List),
        "summary" => Ok(LedgerCommand::Summary),
        other => Err(unknown(format!("ledger {other}"))),
    }
}

fn parse_goal<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<GoalCommand> {
    match words.next().unwrap_or("show") {
        "show" => Ok(GoalCommand::Show),
        "set" => Ok(GoalCommand::Set {
            target: number(words.next(), "target")?,
            current: number(words.next(), "current")?,
            deadline: parse_date(required(words.next(), "deadline")?)?,
        }),
        other => Err(unknown(format!("goal {other}"))),
    }
}

fn parse_parent<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<ParentCommand> {
    match words.next().unwrap_or("show") {
        "show" => Ok(ParentCommand::Show),
        "threshold" => Ok(ParentCommand::Threshold(number(words.next(), "threshold")?)),
        "email" => Ok(ParentCommand::Email(
            required(words.next(), "email")?.to_string(),
        )),
        other => Err(unknown(format!("parent {other}"))),
    }
}
