//! Quiz reference data - age tiers, questions, and the question bank.
//!
//! The bank is immutable once built. It is validated on construction so the
//! quiz engine can index options and tiers without re-checking.

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, path::Path, str::FromStr};

use crate::{
    errors::{Error, Result},
    locale::{Locale, LocalizedText},
};

/// Number of answer options every question carries in every locale.
pub const OPTION_COUNT: usize = 4;

/// Audience band that selects a subset of questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeTier {
    /// Ages 8 to 12
    #[serde(rename = "8-12")]
    Kids,
    /// Ages 13 to 17
    #[serde(rename = "13-17")]
    Teens,
    /// 18 and older
    #[serde(rename = "18+")]
    Adults,
}

impl AgeTier {
    /// All tiers in display order.
    pub const ALL: [Self; 3] = [Self::Kids, Self::Teens, Self::Adults];

    /// The tag shown to users and used in config files.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Kids => "8-12",
            Self::Teens => "13-17",
            Self::Adults => "18+",
        }
    }
}

impl fmt::Display for AgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AgeTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.tag() == s.trim())
            .ok_or_else(|| Error::UnknownAgeTier {
                tier: s.trim().to_string(),
            })
    }
}

/// Answer options per locale. Index N is the same answer in every locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedOptions {
    /// Azerbaijani options
    pub az: Vec<String>,
    /// English options
    pub en: Vec<String>,
    /// Russian options
    pub ru: Vec<String>,
}

impl LocalizedOptions {
    /// Options for `locale`.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &[String] {
        match locale {
            Locale::Az => &self.az,
            Locale::En => &self.en,
            Locale::Ru => &self.ru,
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Unique identifier within the bank
    pub id: u32,
    /// Question text per locale
    pub question: LocalizedText,
    /// Four options per locale
    pub options: LocalizedOptions,
    /// Zero-based index of the correct option
    pub correct_answer: usize,
    /// Tier this question is served to
    pub age_group: AgeTier,
    /// Points awarded for a correct answer
    pub points: u32,
}

impl QuizQuestion {
    /// Number of options, identical across locales once validated.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.en.len()
    }
}

#[derive(Debug, Deserialize)]
struct BankFile {
    questions: Vec<QuizQuestion>,
}

/// Validated, ordered collection of quiz questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl QuestionBank {
    /// Builds a bank after checking every structural rule.
    ///
    /// # Errors
    /// Returns [`Error::InvalidQuestionBank`] if a question has the wrong number
    /// of options in some locale, an out-of-range correct answer, zero points,
    /// a duplicate id, or if a tier ends up with no questions.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self> {
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id) {
                return Err(invalid(format!("duplicate question id {}", q.id)));
            }
            for locale in Locale::ALL {
                let count = q.options.get(locale).len();
                if count != OPTION_COUNT {
                    return Err(invalid(format!(
                        "question {} has {count} options in '{locale}', expected {OPTION_COUNT}",
                        q.id
                    )));
                }
            }
            if q.correct_answer >= OPTION_COUNT {
                return Err(invalid(format!(
                    "question {} has correct answer {} out of range",
                    q.id, q.correct_answer
                )));
            }
            if q.points == 0 {
                return Err(invalid(format!("question {} awards zero points", q.id)));
            }
        }
        for tier in AgeTier::ALL {
            if !questions.iter().any(|q| q.age_group == tier) {
                return Err(invalid(format!("tier {tier} has no questions")));
            }
        }
        Ok(Self { questions })
    }

    /// Parses a bank from TOML text with a `[[questions]]` array.
    ///
    /// # Errors
    /// Returns [`Error::InvalidQuestionBank`] on syntax errors or failed validation.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: BankFile = toml::from_str(contents)
            .map_err(|e| invalid(format!("failed to parse question bank: {e}")))?;
        Self::new(file.questions)
    }

    /// Loads a bank from a TOML file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`QuestionBank::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Loading question bank from {:?}", path.as_ref());
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Questions for `tier` in reference order.
    pub fn for_tier(&self, tier: AgeTier) -> impl Iterator<Item = &QuizQuestion> {
        self.questions.iter().filter(move |q| q.age_group == tier)
    }

    /// The `index`-th question of `tier`, if it exists.
    #[must_use]
    pub fn question_at(&self, tier: AgeTier, index: usize) -> Option<&QuizQuestion> {
        self.for_tier(tier).nth(index)
    }

    /// Number of questions served to `tier`.
    #[must_use]
    pub fn tier_len(&self, tier: AgeTier) -> usize {
        self.for_tier(tier).count()
    }

    /// Every question in reference order.
    #[must_use]
    pub fn all(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// The cybersecurity and money-safety questions shipped with the app.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn builtin() -> Self {
        let questions = vec![
            question(
                1,
                AgeTier::Kids,
                10,
                [
                    "Bank kartınızın PIN kodunu kimlərlə paylaşmalısınız?",
                    "Who should you share your bank card PIN code with?",
                    "С кем вы должны делиться PIN-кодом вашей банковской карты?",
                ],
                [
                    ["Heç kimlə", "Dostlarımla", "Müəllimimlə", "İnternet dostlarımla"],
                    ["No one", "With friends", "With teacher", "With internet friends"],
                    ["Ни с кем", "С друзьями", "С учителем", "С интернет-друзьями"],
                ],
            ),
            question(
                2,
                AgeTier::Kids,
                10,
                [
                    "İnternetdə pul xərcləməzdən əvvəl nə etməlisiniz?",
                    "What should you do before spending money online?",
                    "Что вы должны сделать перед тратой денег в интернете?",
                ],
                [
                    [
                        "Valideynimlə danışmalıyam",
                        "Dərhal ödəməliyəm",
                        "Heç nə etməməliyəm",
                        "Dostlarıma soruşmalıyam",
                    ],
                    ["Talk to my parents", "Pay immediately", "Do nothing", "Ask friends"],
                    [
                        "Поговорить с родителями",
                        "Заплатить немедленно",
                        "Ничего не делать",
                        "Спросить друзей",
                    ],
                ],
            ),
            question(
                3,
                AgeTier::Kids,
                10,
                [
                    "Kimsə sizə pulsuz pul vəd edərsə nə etməlisiniz?",
                    "What should you do if someone promises you free money?",
                    "Что делать, если кто-то обещает вам бесплатные деньги?",
                ],
                [
                    [
                        "Şübhə etməli və böyüklərimə deməliyəm",
                        "Dərhal qəbul etməliyəm",
                        "Dostlarıma danışmalıyam",
                        "Məlumatlarımı verməliyəm",
                    ],
                    [
                        "Be suspicious and tell adults",
                        "Accept immediately",
                        "Tell friends",
                        "Give my information",
                    ],
                    [
                        "Быть подозрительным и сказать взрослым",
                        "Принять немедленно",
                        "Рассказать друзьям",
                        "Дать мою информацию",
                    ],
                ],
            ),
            question(
                4,
                AgeTier::Kids,
                10,
                [
                    "Pul yığmaq üçün ən yaxşı yer hansıdır?",
                    "What is the best place to save money?",
                    "Какое лучшее место для сбережения денег?",
                ],
                [
                    ["Bank hesabı", "Yastığın altında", "Oyuncağımda", "Dostumda"],
                    ["Bank account", "Under pillow", "In my toy", "With a friend"],
                    ["Банковский счет", "Под подушкой", "В моей игрушке", "У друга"],
                ],
            ),
            question(
                5,
                AgeTier::Teens,
                15,
                [
                    "Onlayn alış-veriş edərkən hansı təhlükəsizlik elementinə diqqət etməlisiniz?",
                    "What security element should you look for when shopping online?",
                    "На какой элемент безопасности следует обратить внимание при покупках онлайн?",
                ],
                [
                    ["HTTPS və kilid işarəsi", "Rəngli dizayn", "Böyük şriftlər", "Çox reklam"],
                    ["HTTPS and lock icon", "Colorful design", "Large fonts", "Many ads"],
                    [
                        "HTTPS и значок замка",
                        "Красочный дизайн",
                        "Крупные шрифты",
                        "Много рекламы",
                    ],
                ],
            ),
            question(
                6,
                AgeTier::Teens,
                15,
                ["Phishing nədir?", "What is phishing?", "Что такое фишинг?"],
                [
                    [
                        "Şəxsi məlumatları oğurlamaq üçün aldatma",
                        "Balıq tutma növü",
                        "Onlayn oyun",
                        "Bank xidməti",
                    ],
                    [
                        "Deception to steal personal information",
                        "Type of fishing",
                        "Online game",
                        "Banking service",
                    ],
                    [
                        "Обман для кражи личной информации",
                        "Вид рыбалки",
                        "Онлайн игра",
                        "Банковский сервис",
                    ],
                ],
            ),
            question(
                7,
                AgeTier::Teens,
                15,
                [
                    "Güclü şifrə necə olmalıdır?",
                    "How should a strong password be?",
                    "Каким должен быть надежный пароль?",
                ],
                [
                    [
                        "Hərf, rəqəm və simvollardan ibarət, uzun",
                        "Sadə və qısa",
                        "Doğum tarixim",
                        "Adım",
                    ],
                    [
                        "Long with letters, numbers and symbols",
                        "Simple and short",
                        "My birth date",
                        "My name",
                    ],
                    [
                        "Длинный с буквами, цифрами и символами",
                        "Простой и короткий",
                        "Моя дата рождения",
                        "Мое имя",
                    ],
                ],
            ),
            question(
                8,
                AgeTier::Teens,
                15,
                [
                    "İki faktorlu autentifikasiya (2FA) nə üçün vacibdir?",
                    "Why is two-factor authentication (2FA) important?",
                    "Почему важна двухфакторная аутентификация (2FA)?",
                ],
                [
                    [
                        "Əlavə təhlükəsizlik təbəqəsi yaradır",
                        "Sürəti artırır",
                        "Pulsuz pul verir",
                        "Reklam göstərir",
                    ],
                    [
                        "Creates additional security layer",
                        "Increases speed",
                        "Gives free money",
                        "Shows ads",
                    ],
                    [
                        "Создает дополнительный уровень безопасности",
                        "Увеличивает скорость",
                        "Дает бесплатные деньги",
                        "Показывает рекламу",
                    ],
                ],
            ),
            question(
                9,
                AgeTier::Adults,
                20,
                [
                    "Hansı maliyyə fırıldaqçılığı növü ən geniş yayılıb?",
                    "Which type of financial fraud is most common?",
                    "Какой тип финансового мошенничества наиболее распространен?",
                ],
                [
                    [
                        "Sosial mühəndislik və phishing",
                        "Fiziki oğurluq",
                        "ATM partlatma",
                        "Bank qarətçiliyi",
                    ],
                    [
                        "Social engineering and phishing",
                        "Physical theft",
                        "ATM blasting",
                        "Bank robbery",
                    ],
                    [
                        "Социальная инженерия и фишинг",
                        "Физическая кража",
                        "Взрыв банкоматов",
                        "Ограбление банка",
                    ],
                ],
            ),
            question(
                10,
                AgeTier::Adults,
                20,
                [
                    "Kredit kartı məlumatlarını hansı halda verməməlisiniz?",
                    "When should you NOT give credit card information?",
                    "Когда НЕ следует давать информацию о кредитной карте?",
                ],
                [
                    [
                        "Telefon zəngi ilə soruşduqda",
                        "Təhlükəsiz saytda",
                        "Bankın tətbiqində",
                        "Şəxsən bankda",
                    ],
                    [
                        "When asked via phone call",
                        "On secure website",
                        "In bank app",
                        "In person at bank",
                    ],
                    [
                        "При запросе по телефону",
                        "На защищенном сайте",
                        "В приложении банка",
                        "Лично в банке",
                    ],
                ],
            ),
            question(
                11,
                AgeTier::Adults,
                20,
                [
                    "Maliyyə portfelini diversifikasiya etmək nə deməkdir?",
                    "What does diversifying a financial portfolio mean?",
                    "Что означает диверсификация финансового портфеля?",
                ],
                [
                    [
                        "Riski azaltmaq üçün müxtəlif aktivlərdə investisiya",
                        "Bütün pulu bir yerdə saxlamaq",
                        "Yalnız nağd saxlamaq",
                        "Heç nə etməmək",
                    ],
                    [
                        "Investing in various assets to reduce risk",
                        "Keeping all money in one place",
                        "Keeping only cash",
                        "Doing nothing",
                    ],
                    [
                        "Инвестирование в различные активы для снижения риска",
                        "Хранение всех денег в одном месте",
                        "Хранение только наличных",
                        "Ничего не делать",
                    ],
                ],
            ),
            question(
                12,
                AgeTier::Adults,
                20,
                [
                    "Kriptovalyuta fırıldaqçılığından qorunmaq üçün nə etməlisiniz?",
                    "What should you do to protect from cryptocurrency fraud?",
                    "Что делать для защиты от мошенничества с криптовалютой?",
                ],
                [
                    [
                        "Təsdiq olunmuş platformalar istifadə edin və araşdırma aparın",
                        "Hər kəsə etibar edin",
                        "Tələsmə ilə investisiya edin",
                        "Şəxsi açarları paylaşın",
                    ],
                    [
                        "Use verified platforms and do research",
                        "Trust everyone",
                        "Invest hastily",
                        "Share private keys",
                    ],
                    [
                        "Использовать проверенные платформы и проводить исследования",
                        "Доверять всем",
                        "Инвестировать поспешно",
                        "Делиться приватными ключами",
                    ],
                ],
            ),
        ];

        Self { questions }
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidQuestionBank { message }
}

fn question(
    id: u32,
    age_group: AgeTier,
    points: u32,
    text: [&str; 3],
    options: [[&str; OPTION_COUNT]; 3],
) -> QuizQuestion {
    let [az, en, ru]: [Vec<String>; 3] =
        options.map(|opts| opts.iter().map(ToString::to_string).collect());
    QuizQuestion {
        id,
        question: LocalizedText::new(text[0], text[1], text[2]),
        options: LocalizedOptions { az, en, ru },
        correct_answer: 0,
        age_group,
        points,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::sample_question;

    #[test]
    fn test_builtin_bank_passes_validation() {
        let bank = QuestionBank::builtin();
        let rebuilt = QuestionBank::new(bank.all().to_vec()).unwrap();
        assert_eq!(rebuilt.all().len(), 12);
    }

    #[test]
    fn test_for_tier_preserves_reference_order() {
        let bank = QuestionBank::builtin();
        for tier in AgeTier::ALL {
            let ids: Vec<u32> = bank.for_tier(tier).map(|q| q.id).collect();
            assert!(!ids.is_empty());
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            assert!(bank.for_tier(tier).all(|q| q.age_group == tier));
        }
        let teen_ids: Vec<u32> = bank.for_tier(AgeTier::Teens).map(|q| q.id).collect();
        assert_eq!(teen_ids, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_rejects_wrong_option_count() {
        let mut q = sample_question(1, AgeTier::Kids, 10, 0);
        q.options.ru.pop();
        let mut bank = QuestionBank::builtin().all().to_vec();
        bank.retain(|existing| existing.id != 1);
        bank.push(q);
        let err = QuestionBank::new(bank).unwrap_err();
        assert!(matches!(err, Error::InvalidQuestionBank { message: _ }));
    }

    #[test]
    fn test_rejects_out_of_range_answer_and_zero_points() {
        let bad_answer = vec![
            sample_question(1, AgeTier::Kids, 10, 4),
            sample_question(2, AgeTier::Teens, 10, 0),
            sample_question(3, AgeTier::Adults, 10, 0),
        ];
        assert!(QuestionBank::new(bad_answer).is_err());

        let zero_points = vec![
            sample_question(1, AgeTier::Kids, 0, 0),
            sample_question(2, AgeTier::Teens, 10, 0),
            sample_question(3, AgeTier::Adults, 10, 0),
        ];
        assert!(QuestionBank::new(zero_points).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids_and_empty_tiers() {
        let duplicate = vec![
            sample_question(1, AgeTier::Kids, 10, 0),
            sample_question(1, AgeTier::Teens, 10, 0),
            sample_question(3, AgeTier::Adults, 10, 0),
        ];
        assert!(QuestionBank::new(duplicate).is_err());

        let missing_tier = vec![
            sample_question(1, AgeTier::Kids, 10, 0),
            sample_question(2, AgeTier::Teens, 10, 0),
        ];
        let err = QuestionBank::new(missing_tier).unwrap_err();
        assert!(err.to_string().contains("18+"));
    }

    #[test]
    fn test_parse_bank_from_toml() {
        let toml_str = r#"
            [[questions]]
            id = 1
            correct_answer = 2
            age_group = "8-12"
            points = 5
            question = { az = "S1", en = "Q1", ru = "В1" }
            options = { az = ["a", "b", "c", "d"], en = ["A", "B", "C", "D"], ru = ["а", "б", "в", "г"] }

            [[questions]]
            id = 2
            correct_answer = 0
            age_group = "13-17"
            points = 5
            question = { az = "S2", en = "Q2", ru = "В2" }
            options = { az = ["a", "b", "c", "d"], en = ["A", "B", "C", "D"], ru = ["а", "б", "в", "г"] }

            [[questions]]
            id = 3
            correct_answer = 1
            age_group = "18+"
            points = 5
            question = { az = "S3", en = "Q3", ru = "В3" }
            options = { az = ["a", "b", "c", "d"], en = ["A", "B", "C", "D"], ru = ["а", "б", "в", "г"] }
        "#;

        let bank = QuestionBank::from_toml_str(toml_str).unwrap();
        assert_eq!(bank.tier_len(AgeTier::Kids), 1);
        let q = bank.question_at(AgeTier::Kids, 0).unwrap();
        assert_eq!(q.correct_answer, 2);
        assert_eq!(q.options.get(Locale::En)[2], "C");
        assert!(bank.question_at(AgeTier::Kids, 1).is_none());
    }

    #[test]
    fn test_age_tier_parses_from_tag() {
        assert_eq!("13-17".parse::<AgeTier>().unwrap(), AgeTier::Teens);
        match "12-13".parse::<AgeTier>().unwrap_err() {
            Error::UnknownAgeTier { tier } => assert_eq!(tier, "12-13"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bank_with_unknown_tier_is_invalid() {
        let toml_str = r#"
            [[questions]]
            id = 1
            correct_answer = 0
            age_group = "30+"
            points = 5
            question = { az = "S", en = "Q", ru = "В" }
            options = { az = ["a", "b", "c", "d"], en = ["A", "B", "C", "D"], ru = ["а", "б", "в", "г"] }
        "#;
        assert!(matches!(
            QuestionBank::from_toml_str(toml_str).unwrap_err(),
            Error::InvalidQuestionBank { .. }
        ));
    }
}
