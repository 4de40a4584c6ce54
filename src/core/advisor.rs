//! Canned-response financial advisor.
//!
//! There is no language model behind this. A question is lowercased and run
//! through an ordered table of keyword rules; the first rule with a matching
//! keyword picks the topic, and the topic picks a fixed answer for the
//! locale. Nothing matching means the default topic.

use tracing::debug;

use crate::locale::{Locale, pick};

/// Subject of a canned answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Saving money
    Save,
    /// Investing basics
    Investment,
    /// Budget planning
    Budget,
    /// Fallback asking for a more precise question
    Default,
}

impl Topic {
    /// Fixed answer for this topic.
    #[must_use]
    pub const fn response(self, locale: Locale) -> &'static str {
        match self {
            Self::Save => pick(
                locale,
                "Pul yığmaq üçün: 1) Hər gəlirdən kiçik hissə ayırın, 2) Xərclərə prioritet verin, 3) Gərəksiz xərcləri azaldın, 4) Məqsəd qoyun və ona çatmaq üçün plan hazırlayın.",
                "To save money: 1) Set aside a small portion from each income, 2) Prioritize expenses, 3) Reduce unnecessary expenses, 4) Set goals and make a plan to reach them.",
                "Чтобы сэкономить деньги: 1) Откладывайте небольшую часть от каждого дохода, 2) Приоритизируйте расходы, 3) Сократите ненужные расходы, 4) Ставьте цели и составляйте план для их достижения.",
            ),
            Self::Investment => pick(
                locale,
                "İnvestisiya gələcək üçün pul qazanmaq üçün pulunuzu müxtəlif yerlərdə yerləşdirməkdir. Yeni başlayanlar üçün əmanət hesabı və ya dövlət istiqrazları təhlükəsizdir.",
                "Investment is placing your money in different places to earn money for the future. For beginners, savings accounts or government bonds are safe.",
                "Инвестиции - это размещение ваших денег в разных местах, чтобы заработать деньги на будущее. Для новичков безопасны сберегательные счета или государственные облигации.",
            ),
            Self::Budget => pick(
                locale,
                "Büdcə planlaşdırmaq üçün: 1) Bütün gəlir və xərclərinizi yazın, 2) Kateqoriyalara ayırın, 3) Hər kateqoriya üçün limit qoyun, 4) Aylıq nəzarət edin və tənzimləyin.",
                "To plan a budget: 1) Write down all income and expenses, 2) Divide into categories, 3) Set limits for each category, 4) Monitor and adjust monthly.",
                "Чтобы спланировать бюджет: 1) Запишите все доходы и расходы, 2) Разделите на категории, 3) Установите лимиты для каждой категории, 4) Контролируйте и корректируйте ежемесячно.",
            ),
            Self::Default => pick(
                locale,
                "Bu mövzuda sizə daha spesifik məlumat verməyə kömək edə bilərəm. Zəhmət olmasa sualınızı daha dəqiq şəkildə verin.",
                "I can help you with more specific information on this topic. Please provide your question more precisely.",
                "Я могу помочь вам с более конкретной информацией по этой теме. Пожалуйста, уточните ваш вопрос.",
            ),
        }
    }
}

/// One entry of the strategy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Lowercase substrings, any of which triggers the rule
    pub keywords: Vec<&'static str>,
    /// Topic answered when triggered
    pub topic: Topic,
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Ordered keyword rules, first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisor {
    rules: Vec<Rule>,
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(vec![
            Rule {
                keywords: vec!["save", "yığ", "экономить"],
                topic: Topic::Save,
            },
            Rule {
                keywords: vec!["invest", "investisiya", "инвест"],
                topic: Topic::Investment,
            },
            Rule {
                keywords: vec!["budget", "büdcə", "бюджет"],
                topic: Topic::Budget,
            },
        ])
    }
}

impl Advisor {
    /// Advisor with a custom rule table.
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Topic of `question`.
    #[must_use]
    pub fn classify(&self, question: &str) -> Topic {
        let lowered = question.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(Topic::Default, |rule| rule.topic)
    }

    /// Canned answer to `question`.
    #[must_use]
    pub fn reply(&self, question: &str, locale: Locale) -> &'static str {
        let topic = self.classify(question);
        debug!("Advisor classified question as {:?}", topic);
        topic.response(locale)
    }
}

/// Opening message of a conversation.
#[must_use]
pub const fn greeting(locale: Locale) -> &'static str {
    pick(
        locale,
        "Salam! Mən sizin AI maliyyə köməkçinizəm. Mənə pul idarəçiliyi, investisiya və büdcə planlaması haqqında sual verə bilərsiniz.",
        "Hello! I am your AI financial assistant. You can ask me questions about money management, investment and budget planning.",
        "Здравствуйте! Я ваш AI финансовый помощник. Вы можете задать мне вопросы об управлении деньгами, инвестициях и планировании бюджета.",
    )
}

/// Suggested questions shown under the chat box.
#[must_use]
pub const fn example_questions(locale: Locale) -> [&'static str; 3] {
    match locale {
        Locale::Az => [
            "Necə pul yığım?",
            "İnvestisiyaya necə başlayım?",
            "Aylıq büdcəmi necə planlaşdırım?",
        ],
        Locale::En => [
            "How can I save money?",
            "How do I start to invest?",
            "How do I plan a monthly budget?",
        ],
        Locale::Ru => [
            "Как мне экономить деньги?",
            "Как начать инвестировать?",
            "Как спланировать месячный бюджет?",
        ],
    }
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    /// The person asking
    User,
    /// The advisor
    Advisor,
}

/// One line of the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Position in the log, starting at 1
    pub id: u64,
    /// Who wrote it
    pub author: Author,
    /// Message text
    pub text: String,
}

/// Chat log with the advisor.
#[derive(Debug, Clone)]
pub struct Conversation {
    advisor: Advisor,
    locale: Locale,
    messages: Vec<Message>,
}

impl Conversation {
    /// Starts a conversation with the greeting for `locale`.
    #[must_use]
    pub fn new(advisor: Advisor, locale: Locale) -> Self {
        let mut conversation = Self {
            advisor,
            locale,
            messages: Vec::new(),
        };
        conversation.push(Author::Advisor, greeting(locale).to_string());
        conversation
    }

    fn push(&mut self, author: Author, text: String) {
        let id = self.messages.len() as u64 + 1;
        self.messages.push(Message { id, author, text });
    }

    /// Changes the language of future replies.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Appends the question and its answer, returning the answer.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn send(&mut self, text: &str) -> Option<&'static str> {
        if text.trim().is_empty() {
            return None;
        }
        let reply = self.advisor.reply(text, self.locale);
        self.push(Author::User, text.to_string());
        self.push(Author::Advisor, reply.to_string());
        Some(reply)
    }

    /// The chat log, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
