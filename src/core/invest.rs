//! Investment guide - suggested products by risk appetite.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    errors::{Error, Result},
    locale::{Locale, pick},
};

/// How much volatility the reader is willing to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Capital preservation first
    #[default]
    Low,
    /// Some fluctuation for better returns
    Medium,
    /// Large swings for the highest expected return
    High,
}

impl RiskLevel {
    /// All levels in display order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Lowercase tag used in commands.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.tag() == s.trim())
            .ok_or_else(|| Error::UnknownCommand {
                input: format!("risk level '{s}'"),
            })
    }
}

/// A product suggested for a risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvestmentOption {
    /// Product name
    pub title: &'static str,
    /// One-sentence explanation
    pub description: &'static str,
    /// Lower bound of the expected yearly return, percent
    pub min_return: u8,
    /// Upper bound of the expected yearly return, percent
    pub max_return: u8,
}

impl InvestmentOption {
    /// Return band formatted like `2-4%`.
    #[must_use]
    pub fn return_band(&self) -> String {
        format!("{}-{}%", self.min_return, self.max_return)
    }
}

const LOW: [&[InvestmentOption]; 3] = [
    &[savings(Locale::Az)],
    &[savings(Locale::En)],
    &[savings(Locale::Ru)],
];
const MEDIUM: [&[InvestmentOption]; 3] = [
    &[bonds(Locale::Az)],
    &[bonds(Locale::En)],
    &[bonds(Locale::Ru)],
];
const HIGH: [&[InvestmentOption]; 3] = [
    &[stocks(Locale::Az)],
    &[stocks(Locale::En)],
    &[stocks(Locale::Ru)],
];

/// Products suggested for `level`.
#[must_use]
pub const fn options_for(level: RiskLevel, locale: Locale) -> &'static [InvestmentOption] {
    let by_locale = match level {
        RiskLevel::Low => LOW,
        RiskLevel::Medium => MEDIUM,
        RiskLevel::High => HIGH,
    };
    match locale {
        Locale::Az => by_locale[0],
        Locale::En => by_locale[1],
        Locale::Ru => by_locale[2],
    }
}

const fn savings(locale: Locale) -> InvestmentOption {
    InvestmentOption {
        title: pick(locale, "Əmanət hesabı", "Savings account", "Сберегательный счет"),
        description: pick(
            locale,
            "Bankda təhlükəsiz saxlanılır və kiçik faiz gətirir.",
            "Kept safely at a bank and earns a small interest.",
            "Хранится в банке в безопасности и приносит небольшой процент.",
        ),
        min_return: 2,
        max_return: 4,
    }
}

const fn bonds(locale: Locale) -> InvestmentOption {
    InvestmentOption {
        title: pick(locale, "İstiqrazlar", "Bonds", "Облигации"),
        description: pick(
            locale,
            "Dövlətə və ya şirkətə borc verib sabit faiz alırsınız.",
            "You lend to a government or company and receive fixed interest.",
            "Вы даете в долг государству или компании и получаете фиксированный процент.",
        ),
        min_return: 5,
        max_return: 8,
    }
}

const fn stocks(locale: Locale) -> InvestmentOption {
    InvestmentOption {
        title: pick(locale, "Səhmlər", "Stocks", "Акции"),
        description: pick(
            locale,
            "Şirkətin bir hissəsinə sahib olursunuz; dəyəri çox dəyişə bilər.",
            "You own a piece of a company; its value can change a lot.",
            "Вы владеете частью компании; ее стоимость может сильно меняться.",
        ),
        min_return: 8,
        max_return: 15,
    }
}

/// General investing tips.
#[must_use]
pub const fn tips(locale: Locale) -> [&'static str; 5] {
    match locale {
        Locale::Az => [
            "Həmişə diversifikasiya edin - bütün pulunuzu bir yerə qoymayın",
            "Uzun müddətli fikirləşin - investisiya səbr tələb edir",
            "Başlamazdan əvvəl araşdırma aparın",
            "Risk səviyyənizi anlayın",
            "Kiçik məbləğlərlə başlayın və öyrənin",
        ],
        Locale::En => [
            "Always diversify - don't put all your money in one place",
            "Think long-term - investing requires patience",
            "Do research before starting",
            "Understand your risk level",
            "Start with small amounts and learn",
        ],
        Locale::Ru => [
            "Всегда диверсифицируйте - не кладите все деньги в одно место",
            "Думайте долгосрочно - инвестирование требует терпения",
            "Проводите исследования перед началом",
            "Понимайте свой уровень риска",
            "Начинайте с небольших сумм и учитесь",
        ],
    }
}
