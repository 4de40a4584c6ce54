//! Display-language selection.
//!
//! The locale only picks which string to show. It never influences scoring,
//! date arithmetic, or validation.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::{Error, Result};

/// One of the three supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Azerbaijani
    #[default]
    Az,
    /// English
    En,
    /// Russian
    Ru,
}

impl Locale {
    /// All locales in display order.
    pub const ALL: [Self; 3] = [Self::Az, Self::En, Self::Ru];

    /// Returns the lowercase tag for this locale.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Az => "az",
            Self::En => "en",
            Self::Ru => "ru",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "az" => Ok(Self::Az),
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            other => Err(Error::Config {
                message: format!("Unsupported locale '{other}', expected az, en or ru"),
            }),
        }
    }
}

/// A string available in every locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Azerbaijani text
    pub az: String,
    /// English text
    pub en: String,
    /// Russian text
    pub ru: String,
}

impl LocalizedText {
    /// Builds a localized string from three borrowed literals.
    #[must_use]
    pub fn new(az: &str, en: &str, ru: &str) -> Self {
        Self {
            az: az.to_string(),
            en: en.to_string(),
            ru: ru.to_string(),
        }
    }

    /// Resolves the text for `locale`.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Az => &self.az,
            Locale::En => &self.en,
            Locale::Ru => &self.ru,
        }
    }
}

/// Picks one of three static strings by locale.
#[must_use]
pub const fn pick(locale: Locale, az: &'static str, en: &'static str, ru: &'static str) -> &'static str {
    match locale {
        Locale::Az => az,
        Locale::En => en,
        Locale::Ru => ru,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_locale_is_case_insensitive() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" ru ".parse::<Locale>().unwrap(), Locale::Ru);
        assert!(matches!(
            "de".parse::<Locale>().unwrap_err(),
            Error::Config { message: _ }
        ));
    }

    #[test]
    fn test_localized_text_resolves_each_locale() {
        let text = LocalizedText::new("Salam", "Hello", "Привет");
        assert_eq!(text.get(Locale::Az), "Salam");
        assert_eq!(text.get(Locale::En), "Hello");
        assert_eq!(text.get(Locale::Ru), "Привет");
    }
}
