//! Application settings loaded from config.toml
//!
//! Every table is optional. A file containing only `[app]` with a locale is
//! as valid as an empty file; omitted values take the defaults documented on
//! each field.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{
    core::{parental::ParentalSettings, questions::QuestionBank, quiz::QuizRules},
    errors::{Error, Result},
    locale::Locale,
};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `[app]` table
    pub app: AppSection,
    /// `[quiz]` table, the coin economy rules
    pub quiz: QuizRules,
    /// `[calendar]` table
    pub calendar: CalendarSection,
    /// `[advisor]` table
    pub advisor: AdvisorSection,
    /// `[parental]` table, the initial parental settings
    pub parental: ParentalSettings,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Display language (default `az`)
    pub locale: Locale,
    /// Seed the calendar and ledger with demo entries (default `true`)
    pub sample_data: bool,
    /// TOML file with a `[[questions]]` array replacing the built-in bank
    pub question_bank: Option<PathBuf>,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            sample_data: true,
            question_bank: None,
        }
    }
}

/// Calendar view settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalendarSection {
    /// Maximum entries in the upcoming list (default 5)
    pub upcoming_limit: usize,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            upcoming_limit: crate::core::calendar::DEFAULT_UPCOMING_LIMIT,
        }
    }
}

/// Advisor chat settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdvisorSection {
    /// Pause before the advisor replies, in milliseconds (default 1000)
    pub reply_delay_ms: u64,
}

impl Default for AdvisorSection {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
        }
    }
}

impl AppConfig {
    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the TOML is malformed or a value fails
    /// validation.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot check on its own.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.calendar.upcoming_limit == 0 {
            return Err(Error::Config {
                message: "calendar.upcoming_limit must be at least 1".to_string(),
            });
        }
        if self.quiz.reward_divisor == 0 {
            return Err(Error::Config {
                message: "quiz.reward_divisor must be at least 1".to_string(),
            });
        }
        self.parental.validate().map_err(|e| Error::Config {
            message: format!("Invalid [parental] settings: {e}"),
        })
    }

    /// The configured question bank, or the built-in one if none is set.
    ///
    /// # Errors
    /// Returns the loading error of [`QuestionBank::load`].
    pub fn question_bank(&self) -> Result<QuestionBank> {
        match &self.app.question_bank {
            Some(path) => {
                info!("Loading question bank from {}", path.display());
                QuestionBank::load(path)
            }
            None => Ok(QuestionBank::builtin()),
        }
    }
}

/// Loads application configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value fails validation
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!(
            "Failed to read config file {}: {e}",
            path.as_ref().display()
        ),
    })?;

    AppConfig::from_toml_str(&contents)
}
