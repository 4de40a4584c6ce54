//! Calendar business logic - month grid arithmetic and dated financial events.
//!
//! Months are 0-indexed at this interface (0 = January, 11 = December) and
//! weekdays count from Sunday (0 = Sunday). Events are kept in an append-only
//! list; every view re-filters or re-sorts it by date, so insertion order only
//! matters as the tie-breaker of the upcoming projection.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    errors::{Error, Result},
    locale::Locale,
    models::{EventKind, FinancialEvent},
};

/// Default number of entries in the upcoming projection.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// A year and month the calendar is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// Cursor for `year` and 0-indexed `month`, or `None` if out of range.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1).map(|first| Self { first })
    }

    /// Cursor for the month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// 0-indexed month.
    #[must_use]
    pub fn month(self) -> u32 {
        self.first.month0()
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Last day of the month, found as the day before the next month's first.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|first_of_next| first_of_next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of days in the month.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        self.last_day().day()
    }

    /// Weekday of the first day, 0 = Sunday.
    #[must_use]
    pub fn starting_weekday(self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Moves by `delta` months, rolling over year boundaries.
    ///
    /// Stays put if the result would leave the supported date range.
    #[must_use]
    pub fn shift(self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        moved.map_or_else(
            || {
                warn!("Month shift by {} from {} is out of range", delta, self.first);
                self
            },
            |first| Self { first },
        )
    }

    /// The date of `day` in this month, if it exists.
    #[must_use]
    pub fn date_of(self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days_in_month() {
            return None;
        }
        self.first.with_day(day)
    }

    /// Zero-padded `YYYY-MM-DD` key of `day` in this month.
    #[must_use]
    pub fn day_key(self, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month() + 1, day)
    }

    /// The grid of blank and numbered cells for this month.
    #[must_use]
    pub fn grid(self) -> MonthGrid {
        let starting_weekday = self.starting_weekday();
        let days_in_month = self.days_in_month();
        let cells = (0..starting_weekday)
            .map(|_| None)
            .chain((1..=days_in_month).map(Some))
            .collect();
        MonthGrid {
            year: self.year(),
            month: self.month(),
            days_in_month,
            starting_weekday,
            cells,
        }
    }
}

/// Leading blanks followed by numbered days; no trailing blanks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    /// Calendar year
    pub year: i32,
    /// 0-indexed month
    pub month: u32,
    /// Number of numbered cells
    pub days_in_month: u32,
    /// Number of leading blanks, 0 = month starts on Sunday
    pub starting_weekday: u32,
    /// `None` for a blank cell, `Some(day)` otherwise
    pub cells: Vec<Option<u32>>,
}

impl MonthGrid {
    /// Cells split into rows of seven; the last row may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<u32>]> {
        self.cells.chunks(7)
    }
}

/// Form input for a new calendar event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    /// Required title
    pub title: String,
    /// Income, expense or goal
    pub kind: EventKind,
    /// Optional non-negative amount
    pub amount: Option<f64>,
    /// Day of the event
    pub date: NaiveDate,
}

/// Event amounts of one month, grouped by kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MonthSummary {
    /// Sum of income amounts
    pub income: f64,
    /// Sum of expense amounts
    pub expense: f64,
    /// Sum of goal amounts
    pub goal: f64,
    /// Number of events in the month, with or without amount
    pub events: usize,
}

/// The event list plus the month being viewed.
#[derive(Debug, Clone)]
pub struct Calendar {
    events: Vec<FinancialEvent>,
    cursor: MonthCursor,
    next_id: u64,
    upcoming_limit: usize,
}

impl Calendar {
    /// Empty calendar viewing `year` and 0-indexed `month`.
    ///
    /// Falls back to the epoch month if the pair is out of range.
    #[must_use]
    pub fn new(year: i32, month: u32, upcoming_limit: usize) -> Self {
        let cursor = MonthCursor::new(year, month).unwrap_or_else(|| {
            warn!("Invalid calendar month {}/{}, using 1970-01", year, month);
            MonthCursor::containing(NaiveDate::default())
        });
        Self::viewing(cursor, upcoming_limit)
    }

    /// Empty calendar viewing `cursor`.
    #[must_use]
    pub const fn viewing(cursor: MonthCursor, upcoming_limit: usize) -> Self {
        Self {
            events: Vec::new(),
            cursor,
            next_id: 1,
            upcoming_limit,
        }
    }

    /// Adds the demo entries shown on first launch.
    #[must_use]
    pub fn with_sample_events(mut self) -> Self {
        let samples = [
            ("Weekly Allowance", EventKind::Income, 100.0, 5),
            ("Birthday Gift", EventKind::Income, 200.0, 15),
            ("School Trip", EventKind::Expense, 50.0, 20),
            ("Save for Bicycle", EventKind::Goal, 500.0, 31),
        ];
        for (title, kind, amount, day) in samples {
            if let Some(date) = NaiveDate::from_ymd_opt(2025, 12, day) {
                self.push(title.to_string(), kind, Some(amount), date);
            }
        }
        self
    }

    /// Appends an event.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] for a blank title and
    /// [`Error::InvalidAmount`] for a negative or non-finite amount.
    pub fn add_event(&mut self, input: NewEvent) -> Result<&FinancialEvent> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(Error::MissingField {
                field: "title".to_string(),
            });
        }
        if let Some(amount) = input.amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::InvalidAmount { amount });
            }
        }
        if input.kind == EventKind::Goal && input.amount.is_none() {
            debug!("Goal event '{}' added without an amount", title);
        }
        let title = title.to_string();
        Ok(self.push(title, input.kind, input.amount, input.date))
    }

    fn push(
        &mut self,
        title: String,
        kind: EventKind,
        amount: Option<f64>,
        date: NaiveDate,
    ) -> &FinancialEvent {
        let id = self.next_id;
        self.next_id += 1;
        info!("Calendar event {} '{}' ({}) on {}", id, title, kind, date);
        let index = self.events.len();
        self.events.push(FinancialEvent {
            id,
            title,
            kind,
            amount,
            date,
        });
        &self.events[index]
    }

    /// All events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[FinancialEvent] {
        &self.events
    }

    /// Month being viewed.
    #[must_use]
    pub const fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    /// Grid of the month being viewed.
    #[must_use]
    pub fn grid(&self) -> MonthGrid {
        self.cursor.grid()
    }

    /// Moves the view by `delta` months.
    pub fn change_month(&mut self, delta: i32) {
        self.cursor = self.cursor.shift(delta);
    }

    /// Jumps to the month containing `date`.
    pub fn show_month_of(&mut self, date: NaiveDate) {
        self.cursor = MonthCursor::containing(date);
    }

    /// Events dated exactly on `day` of the month being viewed.
    ///
    /// Days outside the month match nothing.
    #[must_use]
    pub fn events_for_day(&self, day: u32) -> Vec<&FinancialEvent> {
        let Some(target) = self.cursor.date_of(day) else {
            return Vec::new();
        };
        self.events.iter().filter(|e| e.date == target).collect()
    }

    /// Events on or after `today`, earliest first, capped at the upcoming limit.
    ///
    /// Events sharing a date keep their insertion order.
    #[must_use]
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&FinancialEvent> {
        let mut upcoming: Vec<&FinancialEvent> =
            self.events.iter().filter(|e| e.date >= today).collect();
        upcoming.sort_by_key(|e| e.date);
        upcoming.truncate(self.upcoming_limit);
        upcoming
    }

    /// Totals of the events dated in the month being viewed.
    #[must_use]
    pub fn month_summary(&self) -> MonthSummary {
        let first = self.cursor.first_day();
        let last = self.cursor.last_day();
        self.events
            .iter()
            .filter(|e| e.date >= first && e.date <= last)
            .fold(MonthSummary::default(), |mut acc, e| {
                let amount = e.amount.unwrap_or(0.0);
                match e.kind {
                    EventKind::Income => acc.income += amount,
                    EventKind::Expense => acc.expense += amount,
                    EventKind::Goal => acc.goal += amount,
                }
                acc.events += 1;
                acc
            })
    }
}

/// Localized name of 0-indexed `month`; empty for out-of-range input.
#[must_use]
pub fn month_name(locale: Locale, month: u32) -> &'static str {
    const AZ: [&str; 12] = [
        "Yanvar", "Fevral", "Mart", "Aprel", "May", "İyun", "İyul", "Avqust", "Sentyabr",
        "Oktyabr", "Noyabr", "Dekabr",
    ];
    const EN: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    const RU: [&str; 12] = [
        "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
        "Октябрь", "Ноябрь", "Декабрь",
    ];
    let names = match locale {
        Locale::Az => &AZ,
        Locale::En => &EN,
        Locale::Ru => &RU,
    };
    usize::try_from(month)
        .ok()
        .and_then(|m| names.get(m))
        .copied()
        .unwrap_or_default()
}

/// Localized weekday headers starting on Sunday.
#[must_use]
pub const fn weekday_labels(locale: Locale) -> [&'static str; 7] {
    match locale {
        Locale::Az => ["B.e", "Ç.a", "Ç", "C.a", "C", "Ş", "B"],
        Locale::En => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        Locale::Ru => ["Вс", "Пн", "Вт", "Ср", "Чт", "Пт", "Сб"],
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{date, december_2025, new_event};
    use chrono::Weekday;

    #[test]
    fn test_december_2025_grid() {
        let grid = december_2025().grid();
        let first = date(2025, 12, 1);
        assert_eq!(first.weekday(), Weekday::Mon);
        assert_eq!(grid.days_in_month, 31);
        assert_eq!(grid.starting_weekday, first.weekday().num_days_from_sunday());
        assert_eq!(grid.starting_weekday, 1);
        assert_eq!(grid.cells.len(), 1 + 31);
        assert_eq!(grid.cells[0], None);
        assert_eq!(grid.cells[1], Some(1));
        assert_eq!(grid.cells.last(), Some(&Some(31)));
    }

    #[test]
    fn test_grid_has_no_trailing_blanks() {
        // February 2026 starts on a Sunday.
        let grid = MonthCursor::new(2026, 1).unwrap().grid();
        assert_eq!(grid.starting_weekday, 0);
        assert_eq!(grid.days_in_month, 28);
        assert_eq!(grid.cells.len(), 28);
        assert_eq!(grid.weeks().count(), 4);
    }

    #[test]
    fn test_leap_february() {
        let cursor = MonthCursor::new(2024, 1).unwrap();
        assert_eq!(cursor.days_in_month(), 29);
        assert_eq!(cursor.last_day(), date(2024, 2, 29));
    }

    #[test]
    fn test_last_day_of_december_is_in_same_year() {
        let cursor = MonthCursor::new(2025, 11).unwrap();
        assert_eq!(cursor.last_day(), date(2025, 12, 31));
        assert_eq!(cursor.days_in_month(), 31);
        assert_eq!(MonthCursor::new(2025, 3).unwrap().last_day(), date(2025, 4, 30));
    }

    #[test]
    fn test_change_month_rolls_year_boundaries() {
        let mut cal = Calendar::new(2025, 0, DEFAULT_UPCOMING_LIMIT);
        cal.change_month(-1);
        assert_eq!((cal.cursor().year(), cal.cursor().month()), (2024, 11));

        let mut cal = december_2025();
        cal.change_month(1);
        assert_eq!((cal.cursor().year(), cal.cursor().month()), (2026, 0));

        cal.change_month(-13);
        assert_eq!((cal.cursor().year(), cal.cursor().month()), (2024, 11));
    }

    #[test]
    fn test_events_for_day_is_exact_match() {
        let mut cal = december_2025();
        cal.add_event(new_event("Allowance", date(2025, 12, 5))).unwrap();
        cal.add_event(new_event("Same day next year", date(2026, 12, 5)))
            .unwrap();
        cal.add_event(new_event("Next day", date(2025, 12, 6))).unwrap();

        let on_fifth = cal.events_for_day(5);
        assert_eq!(on_fifth.len(), 1);
        assert_eq!(on_fifth[0].title, "Allowance");
        assert_eq!(cal.cursor().day_key(5), "2025-12-05");

        assert!(cal.events_for_day(0).is_empty());
        assert!(cal.events_for_day(32).is_empty());
    }

    #[test]
    fn test_upcoming_is_capped_sorted_and_excludes_past() {
        let mut cal = december_2025();
        for (title, day) in [("f", 20), ("a", 3), ("past", 1), ("b", 10), ("c", 10)] {
            cal.add_event(new_event(title, date(2025, 12, day))).unwrap();
        }
        for day in [25, 26, 27] {
            cal.add_event(new_event("late", date(2025, 12, day))).unwrap();
        }

        let upcoming = cal.upcoming(date(2025, 12, 3));
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c", "f", "late"]);
        assert!(upcoming.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(upcoming.iter().all(|e| e.title != "past"));
    }

    #[test]
    fn test_upcoming_includes_today() {
        let mut cal = december_2025();
        cal.add_event(new_event("today", date(2025, 12, 15))).unwrap();
        assert_eq!(cal.upcoming(date(2025, 12, 15)).len(), 1);
        assert!(cal.upcoming(date(2025, 12, 16)).is_empty());
    }

    #[test]
    fn test_add_event_validation() {
        let mut cal = december_2025();
        let err = cal.add_event(new_event("   ", date(2025, 12, 1))).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: _ }));

        let mut negative = new_event("Refund", date(2025, 12, 1));
        negative.amount = Some(-1.0);
        assert!(matches!(
            cal.add_event(negative).unwrap_err(),
            Error::InvalidAmount { amount: _ }
        ));
        assert!(cal.events().is_empty());
    }

    #[test]
    fn test_goal_without_amount_is_accepted() {
        let mut cal = december_2025();
        let mut goal = new_event("  Save for laptop ", date(2026, 6, 1));
        goal.kind = EventKind::Goal;
        let event = cal.add_event(goal).unwrap();
        assert_eq!(event.title, "Save for laptop");
        assert_eq!(event.amount, None);
    }

    #[test]
    fn test_event_ids_are_unique_and_increasing() {
        let mut cal = december_2025().with_sample_events();
        let id = cal.add_event(new_event("x", date(2025, 12, 2))).unwrap().id;
        assert_eq!(id, 5);
        let ids: Vec<u64> = cal.events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_month_summary_only_counts_viewed_month() {
        let mut cal = december_2025().with_sample_events();
        cal.add_event(new_event("January", date(2026, 1, 2))).unwrap();
        let summary = cal.month_summary();
        assert_eq!(summary.income, 300.0);
        assert_eq!(summary.expense, 50.0);
        assert_eq!(summary.goal, 500.0);
        assert_eq!(summary.events, 4);
    }

    #[test]
    fn test_month_names_and_weekday_labels() {
        assert_eq!(month_name(Locale::En, 11), "December");
        assert_eq!(month_name(Locale::Az, 0), "Yanvar");
        assert_eq!(month_name(Locale::Ru, 12), "");
        assert_eq!(weekday_labels(Locale::En)[0], "Sun");
    }
}
