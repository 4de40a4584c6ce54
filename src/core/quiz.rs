//! Quiz engine - scoring and coin economy for the cybersecurity quiz.
//!
//! The state machine is the pure function [`reduce`]: it takes the current
//! [`QuizState`] and a [`QuizAction`] and returns the next state plus an
//! [`Outcome`]. Actions whose preconditions do not hold produce
//! [`Outcome::Rejected`] and leave the state untouched. [`QuizEngine`] wraps the
//! reducer for hosts that prefer `&mut self` methods.
//!
//! A hint is paid for when it is used. An armed double bonus is only paid for
//! if the answer it rides on is correct.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    core::questions::{AgeTier, QuestionBank},
    locale::{Locale, pick},
};

/// Prices and payout rules of the coin economy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizRules {
    /// Coins charged when a hint is revealed
    pub hint_cost: u32,
    /// Coins charged when an armed bonus doubles a correct answer
    pub bonus_cost: u32,
    /// Final score is divided by this (rounding down) to get the coin reward
    pub reward_divisor: u32,
    /// Keep the coin balance when returning to tier selection
    pub carry_over_coins: bool,
}

impl Default for QuizRules {
    fn default() -> Self {
        Self {
            hint_cost: 3,
            bonus_cost: 5,
            reward_divisor: 20,
            carry_over_coins: false,
        }
    }
}

impl QuizRules {
    /// Coins awarded for finishing with `score`.
    #[must_use]
    pub const fn reward_for(&self, score: u32) -> u32 {
        if self.reward_divisor == 0 {
            0
        } else {
            score / self.reward_divisor
        }
    }
}

/// Mutable bookkeeping of a quiz in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Tier whose questions are being served
    pub tier: AgeTier,
    /// Zero-based position in the tier's question list
    pub index: usize,
    /// Points earned so far
    pub score: u32,
    /// Coin balance
    pub coins: u32,
    /// Chosen but not yet confirmed option
    pub selected: Option<usize>,
    /// Double bonus is armed for the current question
    pub bonus_armed: bool,
    /// Double bonus has been paid for once this session
    pub bonus_used: bool,
}

impl Session {
    const fn start(tier: AgeTier, coins: u32) -> Self {
        Self {
            tier,
            index: 0,
            score: 0,
            coins,
            selected: None,
            bonus_armed: false,
            bonus_used: false,
        }
    }
}

/// Where the quiz currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    /// Choosing an age tier
    TierSelect {
        /// Coins kept from the previous session when carry-over is enabled
        banked_coins: u32,
    },
    /// Answering questions
    InProgress(Session),
    /// All questions answered; read-only until reset
    Finished {
        /// Tier that was played
        tier: AgeTier,
        /// Final score
        score: u32,
        /// Coin balance including the end-of-quiz reward
        coins: u32,
    },
}

impl Default for QuizState {
    fn default() -> Self {
        Self::TierSelect { banked_coins: 0 }
    }
}

/// Tag of a [`QuizState`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Choosing an age tier
    TierSelect,
    /// Answering questions
    InProgress,
    /// All questions answered
    Finished,
}

impl QuizState {
    /// The phase tag of this state.
    #[must_use]
    pub const fn phase(&self) -> QuizPhase {
        match self {
            Self::TierSelect { .. } => QuizPhase::TierSelect,
            Self::InProgress(_) => QuizPhase::InProgress,
            Self::Finished { .. } => QuizPhase::Finished,
        }
    }

    /// Current score; zero on the tier-selection screen.
    #[must_use]
    pub const fn score(&self) -> u32 {
        match self {
            Self::TierSelect { .. } => 0,
            Self::InProgress(session) => session.score,
            Self::Finished { score, .. } => *score,
        }
    }

    /// Current coin balance.
    #[must_use]
    pub const fn coins(&self) -> u32 {
        match self {
            Self::TierSelect { banked_coins } => *banked_coins,
            Self::InProgress(session) => session.coins,
            Self::Finished { coins, .. } => *coins,
        }
    }
}

/// A user interaction with the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    /// Start a session for a tier
    SelectTier(AgeTier),
    /// Choose an option of the current question
    SelectAnswer(usize),
    /// Arm the once-per-session double bonus
    ArmDoubleBonus,
    /// Buy the hint
    UseHint,
    /// Confirm the selected answer and move on
    Advance,
    /// Back to tier selection
    Reset,
}

/// What an action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Preconditions did not hold; state is unchanged
    Rejected,
    /// A session started with this many questions
    TierSelected {
        /// Length of the tier's question list
        questions: usize,
    },
    /// An option was recorded
    AnswerSelected,
    /// The bonus is armed for the current question
    BonusArmed,
    /// The hint cost was paid
    HintRevealed,
    /// An answer was scored and the next question is up
    Scored {
        /// Whether the answer was correct
        correct: bool,
        /// Points added to the score
        points: u32,
    },
    /// The last answer was scored and the quiz is over
    Finished {
        /// Whether the last answer was correct
        correct: bool,
        /// Points added for the last answer
        points: u32,
        /// Final score
        score: u32,
        /// Coins added as end-of-quiz reward
        reward: u32,
    },
    /// Returned to tier selection
    Reset,
}

/// Next state and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the action
    pub state: QuizState,
    /// Result of the action
    pub outcome: Outcome,
}

fn reject(state: &QuizState, action: QuizAction) -> Transition {
    debug!("Quiz action {:?} rejected in phase {:?}", action, state.phase());
    Transition {
        state: state.clone(),
        outcome: Outcome::Rejected,
    }
}

const fn applied(state: QuizState, outcome: Outcome) -> Transition {
    Transition { state, outcome }
}

/// Applies `action` to `state`.
///
/// Never fails: an action whose preconditions do not hold returns the
/// unchanged state with [`Outcome::Rejected`].
#[must_use]
pub fn reduce(
    state: &QuizState,
    action: QuizAction,
    bank: &QuestionBank,
    rules: &QuizRules,
) -> Transition {
    match (state, action) {
        (_, QuizAction::Reset) => {
            let banked_coins = if rules.carry_over_coins {
                state.coins()
            } else {
                0
            };
            applied(QuizState::TierSelect { banked_coins }, Outcome::Reset)
        }

        (QuizState::TierSelect { banked_coins }, QuizAction::SelectTier(tier)) => {
            let questions = bank.tier_len(tier);
            if questions == 0 {
                return reject(state, action);
            }
            let coins = if rules.carry_over_coins {
                *banked_coins
            } else {
                0
            };
            info!("Quiz started for tier {} with {} questions", tier, questions);
            applied(
                QuizState::InProgress(Session::start(tier, coins)),
                Outcome::TierSelected { questions },
            )
        }

        (QuizState::InProgress(session), QuizAction::SelectAnswer(choice)) => {
            let Some(question) = bank.question_at(session.tier, session.index) else {
                return reject(state, action);
            };
            if choice >= question.option_count() {
                return reject(state, action);
            }
            let mut next = session.clone();
            next.selected = Some(choice);
            applied(QuizState::InProgress(next), Outcome::AnswerSelected)
        }

        (QuizState::InProgress(session), QuizAction::ArmDoubleBonus) => {
            if session.coins < rules.bonus_cost || session.bonus_used || session.bonus_armed {
                return reject(state, action);
            }
            let mut next = session.clone();
            next.bonus_armed = true;
            applied(QuizState::InProgress(next), Outcome::BonusArmed)
        }

        (QuizState::InProgress(session), QuizAction::UseHint) => {
            let Some(coins) = session.coins.checked_sub(rules.hint_cost) else {
                return reject(state, action);
            };
            let mut next = session.clone();
            next.coins = coins;
            applied(QuizState::InProgress(next), Outcome::HintRevealed)
        }

        (QuizState::InProgress(session), QuizAction::Advance) => {
            advance(state, session, bank, rules)
        }

        _ => reject(state, action),
    }
}

fn advance(
    state: &QuizState,
    session: &Session,
    bank: &QuestionBank,
    rules: &QuizRules,
) -> Transition {
    let (Some(selected), Some(question)) =
        (session.selected, bank.question_at(session.tier, session.index))
    else {
        return reject(state, QuizAction::Advance);
    };

    let mut next = session.clone();
    let correct = selected == question.correct_answer;
    let mut points = 0;
    if correct {
        points = question.points;
        if next.bonus_armed {
            points *= 2;
            next.bonus_used = true;
            next.coins = next.coins.saturating_sub(rules.bonus_cost);
        }
        next.score += points;
    }

    if next.index + 1 < bank.tier_len(next.tier) {
        next.index += 1;
        next.selected = None;
        next.bonus_armed = false;
        return applied(
            QuizState::InProgress(next),
            Outcome::Scored { correct, points },
        );
    }

    let reward = rules.reward_for(next.score);
    let coins = next.coins + reward;
    info!(
        "Quiz finished for tier {}: score {}, reward {} coins, balance {}",
        next.tier, next.score, reward, coins
    );
    applied(
        QuizState::Finished {
            tier: next.tier,
            score: next.score,
            coins,
        },
        Outcome::Finished {
            correct,
            points,
            score: next.score,
            reward,
        },
    )
}

/// Fixed hint text; it does not depend on the question.
#[must_use]
pub const fn hint_text(locale: Locale) -> &'static str {
    pick(
        locale,
        "İpucu: Doğru cavablardan birini düşünün və təhlükəsizlik qaydalarını yadda saxlayın!",
        "Hint: Think about one of the correct answers and remember security rules!",
        "Подсказка: Подумайте об одном из правильных ответов и помните правила безопасности!",
    )
}

/// The question on screen, resolved for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentQuestion<'a> {
    /// One-based position
    pub number: usize,
    /// Questions in this tier
    pub total: usize,
    /// Question text
    pub text: &'a str,
    /// Option texts in positional order
    pub options: &'a [String],
    /// Chosen option, if any
    pub selected: Option<usize>,
    /// Points at stake
    pub points: u32,
}

/// A row on the tier-selection leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// Display name
    pub name: &'static str,
    /// Best score
    pub score: u32,
    /// Coins held
    pub coins: u32,
}

/// Sample leaderboard shown before a tier is chosen.
#[must_use]
pub fn sample_leaderboard() -> Vec<LeaderboardEntry> {
    [
        ("Ali M.", 180, 15),
        ("Aysel K.", 160, 12),
        ("Elvin S.", 150, 10),
        ("Nigar A.", 140, 8),
        ("Rəşad B.", 130, 5),
    ]
    .into_iter()
    .map(|(name, score, coins)| LeaderboardEntry { name, score, coins })
    .collect()
}

/// Owns a bank, its rules and the current state.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    bank: QuestionBank,
    rules: QuizRules,
    state: QuizState,
}

impl QuizEngine {
    /// Creates an engine on the tier-selection screen.
    #[must_use]
    pub fn new(bank: QuestionBank, rules: QuizRules) -> Self {
        Self {
            bank,
            rules,
            state: QuizState::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &QuizState {
        &self.state
    }

    /// Rules in effect.
    #[must_use]
    pub const fn rules(&self) -> &QuizRules {
        &self.rules
    }

    /// Question bank in use.
    #[must_use]
    pub const fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Applies an action and stores the resulting state.
    pub fn dispatch(&mut self, action: QuizAction) -> Outcome {
        let transition = reduce(&self.state, action, &self.bank, &self.rules);
        self.state = transition.state;
        transition.outcome
    }

    /// Starts a session; `false` if not on the tier-selection screen.
    pub fn select_tier(&mut self, tier: AgeTier) -> bool {
        self.dispatch(QuizAction::SelectTier(tier)) != Outcome::Rejected
    }

    /// Records an answer choice; `false` if out of range or not in progress.
    pub fn select_answer(&mut self, index: usize) -> bool {
        self.dispatch(QuizAction::SelectAnswer(index)) != Outcome::Rejected
    }

    /// Arms the double bonus; `false` if unaffordable, used, or already armed.
    pub fn arm_double_bonus(&mut self) -> bool {
        self.dispatch(QuizAction::ArmDoubleBonus) != Outcome::Rejected
    }

    /// Pays for the hint and returns its text, or `None` if unaffordable.
    pub fn use_hint(&mut self, locale: Locale) -> Option<&'static str> {
        (self.dispatch(QuizAction::UseHint) == Outcome::HintRevealed).then(|| hint_text(locale))
    }

    /// Scores the selected answer and moves on.
    pub fn advance(&mut self) -> Outcome {
        self.dispatch(QuizAction::Advance)
    }

    /// Returns to tier selection.
    pub fn reset(&mut self) {
        self.dispatch(QuizAction::Reset);
    }

    /// The question on screen, if a session is in progress.
    #[must_use]
    pub fn current_question(&self, locale: Locale) -> Option<CurrentQuestion<'_>> {
        let QuizState::InProgress(session) = &self.state else {
            return None;
        };
        let question = self.bank.question_at(session.tier, session.index)?;
        Some(CurrentQuestion {
            number: session.index + 1,
            total: self.bank.tier_len(session.tier),
            text: question.question.get(locale),
            options: question.options.get(locale),
            selected: session.selected,
            points: question.points,
        })
    }

    /// Whether the hint button would be enabled.
    #[must_use]
    pub const fn can_use_hint(&self) -> bool {
        matches!(&self.state, QuizState::InProgress(s) if s.coins >= self.rules.hint_cost)
    }

    /// Whether the bonus button would be enabled.
    #[must_use]
    pub const fn can_arm_bonus(&self) -> bool {
        matches!(
            &self.state,
            QuizState::InProgress(s)
                if s.coins >= self.rules.bonus_cost && !s.bonus_used && !s.bonus_armed
        )
    }

    /// Whether the next/finish button would be enabled.
    #[must_use]
    pub const fn can_advance(&self) -> bool {
        matches!(&self.state, QuizState::InProgress(s) if s.selected.is_some())
    }

    /// Whether the bonus is armed for the current question.
    #[must_use]
    pub const fn bonus_armed(&self) -> bool {
        matches!(&self.state, QuizState::InProgress(s) if s.bonus_armed)
    }

    /// Whether the bonus has been consumed this session.
    #[must_use]
    pub const fn bonus_used(&self) -> bool {
        matches!(&self.state, QuizState::InProgress(s) if s.bonus_used)
    }
}
