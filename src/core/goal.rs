//! Savings goal arithmetic for the dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A target amount to reach by a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    target: f64,
    current: f64,
    deadline: NaiveDate,
}

impl SavingsGoal {
    /// Creates a goal.
    ///
    /// # Errors
    /// Returns [`Error::InvalidAmount`] if `target` is not positive or
    /// `current` is negative, or either is not finite.
    pub fn new(target: f64, current: f64, deadline: NaiveDate) -> Result<Self> {
        if !target.is_finite() || target <= 0.0 {
            return Err(Error::InvalidAmount { amount: target });
        }
        if !current.is_finite() || current < 0.0 {
            return Err(Error::InvalidAmount { amount: current });
        }
        Ok(Self {
            target,
            current,
            deadline,
        })
    }

    /// Amount to reach.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    /// Amount saved so far.
    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Day the goal should be reached.
    #[must_use]
    pub const fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// Saved share of the target in percent; exceeds 100 once overshot.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.current / self.target * 100.0
    }

    /// Progress capped at 100 for drawing a bar.
    #[must_use]
    pub fn progress_bar_fill(&self) -> f64 {
        self.progress_percent().min(100.0)
    }

    /// Amount still missing, never negative.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        (self.target - self.current).max(0.0)
    }

    /// Whole days from `today` until the deadline; negative once it has passed.
    #[must_use]
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_progress_of_default_goal() {
        let goal = SavingsGoal::new(1000.0, 350.0, date(2025, 12, 31)).unwrap();
        assert_eq!(goal.progress_percent(), 35.0);
        assert_eq!(goal.remaining(), 650.0);
        assert_eq!(goal.days_remaining(date(2025, 12, 1)), 30);
        assert_eq!(goal.days_remaining(date(2026, 1, 2)), -2);
    }

    #[test]
    fn test_overshoot_caps_bar_but_not_percent() {
        let goal = SavingsGoal::new(200.0, 300.0, date(2025, 12, 31)).unwrap();
        assert_eq!(goal.progress_percent(), 150.0);
        assert_eq!(goal.progress_bar_fill(), 100.0);
        assert_eq!(goal.remaining(), 0.0);
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        let deadline = date(2025, 12, 31);
        assert!(SavingsGoal::new(0.0, 10.0, deadline).is_err());
        assert!(SavingsGoal::new(100.0, -1.0, deadline).is_err());
        assert!(SavingsGoal::new(f64::NAN, 0.0, deadline).is_err());
    }
}
