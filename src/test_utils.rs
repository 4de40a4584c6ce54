//! Test utilities for `MoneyWise`.
//!
//! Shared fixtures so module tests can focus on the behavior under test
//! instead of building questions, sessions and dates by hand.

#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

use chrono::NaiveDate;

use crate::{
    core::{
        calendar::{Calendar, NewEvent},
        questions::{AgeTier, LocalizedOptions, QuestionBank, QuizQuestion},
        quiz::{QuizState, Session},
    },
    locale::LocalizedText,
    models::EventKind,
};

/// Builds a question with four options per locale.
///
/// # Defaults
/// * `question`: `"Q{id}"` in every locale
/// * `options`: `A`..`D` in every locale
#[must_use]
pub fn sample_question(id: u32, tier: AgeTier, points: u32, correct_answer: usize) -> QuizQuestion {
    let opts = || vec!["A".into(), "B".into(), "C".into(), "D".into()];
    let text = format!("Q{id}");
    QuizQuestion {
        id,
        question: LocalizedText::new(&text, &text, &text),
        options: LocalizedOptions {
            az: opts(),
            en: opts(),
            ru: opts(),
        },
        correct_answer,
        age_group: tier,
        points,
    }
}

/// A bank with one 10-point question per tier whose correct answer is `1`.
#[must_use]
pub fn tiny_bank() -> QuestionBank {
    QuestionBank::new(vec![
        sample_question(1, AgeTier::Kids, 10, 1),
        sample_question(2, AgeTier::Teens, 10, 1),
        sample_question(3, AgeTier::Adults, 10, 1),
    ])
    .unwrap()
}

/// A session at the first question of `tier` holding `coins`.
#[must_use]
pub const fn in_progress(tier: AgeTier, coins: u32) -> QuizState {
    QuizState::InProgress(Session {
        tier,
        index: 0,
        score: 0,
        coins,
        selected: None,
        bonus_armed: false,
        bonus_used: false,
    })
}

/// Shorthand for a valid date.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Event form input with sensible defaults.
///
/// # Defaults
/// * `kind`: income
/// * `amount`: `None`
#[must_use]
pub fn new_event(title: &str, on: NaiveDate) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        kind: EventKind::Income,
        amount: None,
        date: on,
    }
}

/// Calendar viewing December 2025 (month index 11) with no events.
#[must_use]
pub fn december_2025() -> Calendar {
    Calendar::new(2025, 11, 5)
}
