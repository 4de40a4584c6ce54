//! Plain-text rendering of engine state for the shell.
//!
//! Every function here is read-only over the engines and returns the text to
//! print. Content strings come from the engines in the active locale; the
//! surrounding chrome is English.

use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

use crate::{
    core::{
        advisor::example_questions,
        calendar::{Calendar, MonthSummary, month_name, weekday_labels},
        goal::SavingsGoal,
        invest::{RiskLevel, options_for, tips},
        ledger::LedgerSummary,
        parental::{Channel, ExpenseAlert, ParentalSettings},
        questions::{AgeTier, QuestionBank},
        quiz::{CurrentQuestion, QuizEngine, QuizState, sample_leaderboard},
    },
    errors::Result,
    locale::Locale,
    models::{EventKind, FinancialEvent, Transaction, TransactionKind},
};

/// Command reference printed by `help`.
pub const HELP: &str = "\
Commands:
  help | quit
  lang <az|en|ru>
  quiz tiers | quiz start <8-12|13-17|18+> | quiz answer <1-4>
  quiz hint | quiz bonus | quiz next | quiz reset | quiz status
  cal show | cal next | cal prev | cal day <n> | cal upcoming
  cal add <income|expense|goal> <YYYY-MM-DD> [amount=<n>] <title...>
  ledger add <income|expense> <amount> <category> [description...]
  ledger list | ledger summary
  goal show | goal set <target> <current> <YYYY-MM-DD>
  parent show | parent threshold <n> | parent email <addr>
  ask <question...>
  invest <low|medium|high>";

/// Amount in manat with two decimals.
#[must_use]
pub fn money(amount: f64) -> String {
    format!("₼{amount:.2}")
}

/// Text progress bar like `[████░░░░░░] 35.0%`.
///
/// The bar is clamped to 0..=100 while the printed percentage is not.
#[must_use]
pub fn progress_bar(percent: f64, length: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);

    // clamped is in [0, 100] and length is small, so the product fits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

const fn event_marker(kind: EventKind) -> char {
    match kind {
        EventKind::Income => '+',
        EventKind::Expense => '-',
        EventKind::Goal => '*',
    }
}

/// One event as a list line.
#[must_use]
pub fn event_line(event: &FinancialEvent) -> String {
    let amount = event.amount.map(money).unwrap_or_default();
    format!(
        "{} {} {:<8} {:>10}  {}",
        event.date,
        event_marker(event.kind),
        event.kind.tag(),
        amount,
        event.title
    )
}

/// The viewed month as a grid with event markers, followed by its totals.
///
/// # Errors
/// Only on a formatting failure.
pub fn month_view(calendar: &Calendar, locale: Locale) -> Result<String> {
    let grid = calendar.grid();
    let mut out = String::new();
    writeln!(out, "{} {}", month_name(locale, grid.month), grid.year)?;
    for label in weekday_labels(locale) {
        write!(out, "{label:>5}")?;
    }
    writeln!(out)?;

    for week in grid.weeks() {
        for cell in week {
            match cell {
                Some(day) => {
                    let marker = calendar
                        .events_for_day(*day)
                        .first()
                        .map_or(' ', |event| event_marker(event.kind));
                    write!(out, "{day:>4}{marker}")?;
                }
                None => write!(out, "{:>5}", "")?,
            }
        }
        writeln!(out)?;
    }

    write!(out, "{}", month_totals(&calendar.month_summary()))?;
    Ok(out)
}

fn month_totals(summary: &MonthSummary) -> String {
    format!(
        "Income {}  Expense {}  Goals {}  ({} events)",
        money(summary.income),
        money(summary.expense),
        money(summary.goal),
        summary.events
    )
}

/// Event list under a heading, or `empty` if there are none.
///
/// # Errors
/// Only on a formatting failure.
pub fn event_list(heading: &str, events: &[&FinancialEvent], empty: &str) -> Result<String> {
    if events.is_empty() {
        return Ok(empty.to_string());
    }
    let mut out = String::new();
    writeln!(out, "{heading}")?;
    for event in events {
        writeln!(out, "  {}", event_line(event))?;
    }
    Ok(out.trim_end().to_string())
}

/// Tier list with question counts and the sample leaderboard.
///
/// # Errors
/// Only on a formatting failure.
pub fn tiers(bank: &QuestionBank) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Age tiers:")?;
    for tier in AgeTier::ALL {
        writeln!(out, "  {:<6} {} questions", tier.tag(), bank.tier_len(tier))?;
    }
    writeln!(out, "Leaderboard:")?;
    for (rank, entry) in sample_leaderboard().iter().enumerate() {
        writeln!(
            out,
            "  {}. {:<10} {:>4} pts {:>3} coins",
            rank + 1,
            entry.name,
            entry.score,
            entry.coins
        )?;
    }
    Ok(out.trim_end().to_string())
}

/// A question with numbered options; the selected one is marked `>`.
///
/// # Errors
/// Only on a formatting failure.
pub fn question(current: &CurrentQuestion<'_>, bonus_armed: bool) -> Result<String> {
    let mut out = String::new();
    write!(
        out,
        "Question {}/{} ({} pts",
        current.number, current.total, current.points
    )?;
    if bonus_armed {
        write!(out, ", 2x armed")?;
    }
    writeln!(out, ")")?;
    writeln!(out, "{}", current.text)?;
    for (index, option) in current.options.iter().enumerate() {
        let marker = if current.selected == Some(index) { '>' } else { ' ' };
        writeln!(out, " {marker} {}. {option}", index + 1)?;
    }
    Ok(out.trim_end().to_string())
}

/// Score, coins and what is on screen.
///
/// # Errors
/// Only on a formatting failure.
pub fn quiz_status(engine: &QuizEngine, locale: Locale) -> Result<String> {
    let mut out = String::new();
    match engine.state() {
        QuizState::TierSelect { banked_coins } => {
            write!(
                out,
                "Choose an age tier with 'quiz start <tier>' ({banked_coins} coins)"
            )?;
        }
        QuizState::InProgress(session) => {
            writeln!(
                out,
                "Tier {}  Score {}  Coins {}{}",
                session.tier,
                session.score,
                session.coins,
                if session.bonus_used { "  (bonus used)" } else { "" }
            )?;
            if let Some(current) = engine.current_question(locale) {
                write!(out, "{}", question(&current, engine.bonus_armed())?)?;
            }
        }
        QuizState::Finished { tier, score, coins } => {
            write!(
                out,
                "Quiz {tier} finished. Score {score}, coins {coins}. Use 'quiz reset' to play again."
            )?;
        }
    }
    Ok(out)
}

/// One ledger entry.
#[must_use]
pub fn transaction_line(transaction: &Transaction) -> String {
    let sign = match transaction.kind {
        TransactionKind::Income => '+',
        TransactionKind::Expense => '-',
    };
    format!(
        "#{:<3} {} {sign}{:>10} {:<13} {}",
        transaction.id,
        transaction.date,
        money(transaction.amount),
        transaction.category.tag(),
        transaction.description
    )
    .trim_end()
    .to_string()
}

/// The three summary cards.
#[must_use]
pub fn ledger_summary(summary: &LedgerSummary) -> String {
    format!(
        "Income {}  Expense {}  Balance {}",
        money(summary.total_income),
        money(summary.total_expense),
        money(summary.balance)
    )
}

/// Goal progress as of `today`.
///
/// # Errors
/// Only on a formatting failure.
pub fn goal(goal: &SavingsGoal, today: NaiveDate) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "Saved {} of {}",
        money(goal.current()),
        money(goal.target())
    )?;
    writeln!(out, "{}", progress_bar(goal.progress_percent(), 20))?;
    let days = goal.days_remaining(today);
    if days >= 0 {
        write!(
            out,
            "{} to go, {days} days left (deadline {})",
            money(goal.remaining()),
            goal.deadline()
        )?;
    } else {
        write!(
            out,
            "{} to go, deadline {} passed {} days ago",
            money(goal.remaining()),
            goal.deadline(),
            -days
        )?;
    }
    Ok(out)
}

const fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn or_unset(value: &str) -> &str {
    if value.trim().is_empty() { "(not set)" } else { value.trim() }
}

/// Current parental settings.
///
/// # Errors
/// Only on a formatting failure.
pub fn parental(settings: &ParentalSettings) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Parent email:  {}", or_unset(&settings.parent_email))?;
    writeln!(out, "Parent phone:  {}", or_unset(&settings.parent_phone))?;
    writeln!(out, "Daily report:  {}", on_off(settings.daily_report))?;
    writeln!(out, "Weekly report: {}", on_off(settings.weekly_report))?;
    write!(
        out,
        "Large expense alert: {} (above {})",
        on_off(settings.alert_on_large_expense),
        money(settings.expense_threshold)
    )?;
    Ok(out)
}

/// Notice printed after a large expense is recorded.
#[must_use]
pub fn alert(alert: &ExpenseAlert) -> String {
    let targets: Vec<String> = alert
        .channels
        .iter()
        .map(|channel| match channel {
            Channel::Email(address) => format!("email {address}"),
            Channel::Phone(number) => format!("phone {number}"),
        })
        .collect();
    let recipients = if targets.is_empty() {
        "no contact configured".to_string()
    } else {
        targets.join(", ")
    };
    format!(
        "Parent alert: expense #{} of {} is above {} ({recipients})",
        alert.transaction_id,
        money(alert.amount),
        money(alert.threshold)
    )
}

/// Suggested products and tips for `level`.
///
/// # Errors
/// Only on a formatting failure.
pub fn investment(level: RiskLevel, locale: Locale) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Risk level: {level}")?;
    for option in options_for(level, locale) {
        writeln!(
            out,
            "  {} ({} per year): {}",
            option.title,
            option.return_band(),
            option.description
        )?;
    }
    writeln!(out, "Tips:")?;
    for tip in tips(locale) {
        writeln!(out, "  - {tip}")?;
    }
    Ok(out.trim_end().to_string())
}

/// Example questions shown after an empty `ask`.
///
/// # Errors
/// Only on a formatting failure.
pub fn ask_examples(locale: Locale) -> Result<String> {
    let mut out = String::from("Try asking:");
    for example in example_questions(locale) {
        write!(out, "\n  ask {example}")?;
    }
    Ok(out)
}

/// Month label for a date, used in calendar navigation replies.
#[must_use]
pub fn month_label(date: NaiveDate, locale: Locale) -> String {
    format!("{} {}", month_name(locale, date.month0()), date.year())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{date, december_2025};

    #[test]
    fn test_progress_bar_clamps_fill_only() {
        assert_eq!(progress_bar(35.0, 10), "[████░░░░░░] 35.0%");
        assert_eq!(progress_bar(150.0, 4), "[████] 150.0%");
        assert_eq!(progress_bar(-5.0, 4), "[░░░░] -5.0%");
    }

    #[test]
    fn test_month_view_layout() {
        let calendar = december_2025().with_sample_events();
        let text = month_view(&calendar, Locale::En).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "December 2025");
        assert!(lines[1].starts_with("  Sun"));
        // 2025-12-01 is a Monday: one blank cell, then day 1
        assert!(lines[2].starts_with("        1 "));
        assert!(text.contains("   5+"));
        assert!(text.contains("  20-"));
        assert!(text.contains("  31*"));
        assert!(lines.last().unwrap().contains("(4 events)"));
    }

    #[test]
    fn test_event_list_empty_and_filled() {
        assert_eq!(event_list("Upcoming:", &[], "Nothing").unwrap(), "Nothing");

        let calendar = december_2025().with_sample_events();
        let events = calendar.events_for_day(5);
        let text = event_list("Events:", &events, "Nothing").unwrap();
        assert!(text.starts_with("Events:\n  2025-12-05 + income"));
        assert!(text.ends_with("Weekly Allowance"));
    }

    #[test]
    fn test_goal_text() {
        let goal = SavingsGoal::new(1000.0, 350.0, date(2025, 12, 31)).unwrap();
        let text = super::goal(&goal, date(2025, 12, 1)).unwrap();
        assert!(text.contains("Saved ₼350.00 of ₼1000.00"));
        assert!(text.contains("35.0%"));
        assert!(text.contains("30 days left"));

        let late = super::goal(&goal, date(2026, 1, 3)).unwrap();
        assert!(late.contains("passed 3 days ago"));
    }

    #[test]
    fn test_alert_without_contacts() {
        let text = alert(&ExpenseAlert {
            transaction_id: 7,
            amount: 80.0,
            threshold: 50.0,
            channels: Vec::new(),
        });
        assert_eq!(
            text,
            "Parent alert: expense #7 of ₼80.00 is above ₼50.00 (no contact configured)"
        );
    }
}
