//! Core business logic - framework-agnostic quiz, calendar and money-tracking operations

/// Canned-response advisor and its conversation log
pub mod advisor;
/// Financial event calendar - month grid, day lookup and upcoming projection
pub mod calendar;
/// Savings goal progress
pub mod goal;
/// Investment guide by risk level
pub mod invest;
/// Income and expense ledger
pub mod ledger;
/// Parental notification settings and alerts
pub mod parental;
/// Age tiers, quiz questions and the question bank
pub mod questions;
/// Quiz state machine and coin economy
pub mod quiz;
