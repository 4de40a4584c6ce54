//! Interactive text shell - the host view layer over the engines.
//!
//! [`Shell`] owns one instance of every engine and turns a parsed
//! [`Command`] into the text to print. [`run`] drives it from any async line
//! source, which is stdin for the binary and a byte slice in tests.

/// Typed commands and their parser
pub mod command;
/// Plain-text rendering of engine state
pub mod render;

use chrono::NaiveDate;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::{
    config::AppConfig,
    core::{
        advisor::{Advisor, Conversation},
        calendar::{Calendar, MonthCursor},
        goal::SavingsGoal,
        ledger::{Ledger, NewTransaction},
        parental::ParentalSettings,
        questions::QuestionBank,
        quiz::{Outcome, QuizEngine, QuizPhase},
    },
    errors::Result,
    locale::Locale,
    models::parse_date,
};

pub use command::{CalendarCommand, Command, GoalCommand, LedgerCommand, ParentCommand, QuizCommand};

const PROMPT: &str = "moneywise> ";

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Print this and read the next line
    Continue(String),
    /// Leave the loop
    Quit,
}

/// All engines plus the active display language.
#[derive(Debug)]
pub struct Shell {
    locale: Locale,
    quiz: QuizEngine,
    calendar: Calendar,
    ledger: Ledger,
    goal: SavingsGoal,
    parental: ParentalSettings,
    chat: Conversation,
}

impl Shell {
    /// Builds the engines from configuration, viewing the month of `today`.
    ///
    /// # Errors
    /// Returns an error if the configured parental settings do not validate.
    pub fn new(config: &AppConfig, bank: QuestionBank, today: NaiveDate) -> Result<Self> {
        config.parental.validate()?;
        let locale = config.app.locale;
        let mut calendar = Calendar::viewing(
            MonthCursor::containing(today),
            config.calendar.upcoming_limit,
        );
        let mut ledger = Ledger::new();
        if config.app.sample_data {
            calendar = calendar.with_sample_events();
            ledger = Ledger::with_sample_entries();
        }
        info!(
            "Shell ready (locale {}, {} events, {} transactions)",
            locale,
            calendar.events().len(),
            ledger.entries().len()
        );
        Ok(Self {
            locale,
            quiz: QuizEngine::new(bank, config.quiz.clone()),
            calendar,
            ledger,
            goal: SavingsGoal::new(1000.0, 350.0, parse_date("2025-12-31")?)?,
            parental: config.parental.clone(),
            chat: Conversation::new(Advisor::default(), locale),
        })
    }

    /// Active display language.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// The quiz engine.
    #[must_use]
    pub const fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }

    /// The calendar.
    #[must_use]
    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// The ledger.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The advisor conversation.
    #[must_use]
    pub const fn chat(&self) -> &Conversation {
        &self.chat
    }

    /// Banner printed when the shell starts.
    #[must_use]
    pub fn welcome(&self) -> String {
        let greeting = self
            .chat
            .messages()
            .first()
            .map(|m| m.text.as_str())
            .unwrap_or_default();
        format!("MoneyWise - type 'help' for commands.\nAdvisor: {greeting}")
    }

    /// Parses and runs one input line.
    ///
    /// # Errors
    /// Returns the parse error or the error of the command.
    pub fn execute(&mut self, line: &str, today: NaiveDate) -> Result<Flow> {
        let command = line.parse()?;
        self.handle(command, today)
    }

    /// Runs one command.
    ///
    /// Rejected quiz moves are reported in the returned text; input that
    /// fails validation is returned as an error.
    ///
    /// # Errors
    /// Returns the validation error of the command.
    pub fn handle(&mut self, command: Command, today: NaiveDate) -> Result<Flow> {
        debug!("Handling {:?}", command);
        let text = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => render::HELP.to_string(),
            Command::Lang(locale) => {
                self.locale = locale;
                self.chat.set_locale(locale);
                format!("Language set to {locale}")
            }
            Command::Quiz(quiz) => self.quiz_command(quiz)?,
            Command::Calendar(cal) => self.calendar_command(cal, today)?,
            Command::Ledger(ledger) => self.ledger_command(ledger, today)?,
            Command::Goal(goal) => self.goal_command(goal, today)?,
            Command::Parent(parent) => self.parent_command(parent)?,
            Command::Ask(question) => match self.chat.send(&question) {
                Some(reply) => format!("Advisor: {reply}"),
                None => render::ask_examples(self.locale)?,
            },
            Command::Invest(level) => render::investment(level, self.locale)?,
        };
        Ok(Flow::Continue(text))
    }

    fn not_playing(&self) -> String {
        match self.quiz.state().phase() {
            QuizPhase::Finished => "The quiz is over. Use 'quiz reset' to play again.".to_string(),
            _ => "No quiz in progress. Use 'quiz start <tier>'.".to_string(),
        }
    }

    fn playing(&self) -> bool {
        self.quiz.state().phase() == QuizPhase::InProgress
    }

    fn quiz_command(&mut self, command: QuizCommand) -> Result<String> {
        let locale = self.locale;
        let coins = self.quiz.state().coins();
        let rules = self.quiz.rules().clone();
        let text = match command {
            QuizCommand::Tiers => render::tiers(self.quiz.bank())?,
            QuizCommand::Status => render::quiz_status(&self.quiz, locale)?,
            QuizCommand::Start(tier) => {
                if self.quiz.select_tier(tier) {
                    render::quiz_status(&self.quiz, locale)?
                } else if self.playing() {
                    "A quiz is already running. Use 'quiz reset' first.".to_string()
                } else {
                    self.not_playing()
                }
            }
            QuizCommand::Answer(choice) => {
                if self.quiz.select_answer(choice) {
                    render::quiz_status(&self.quiz, locale)?
                } else if self.playing() {
                    format!("Option {} does not exist.", choice + 1)
                } else {
                    self.not_playing()
                }
            }
            QuizCommand::Hint => match self.quiz.use_hint(locale) {
                Some(hint) => format!("{hint}\nCoins left: {}", self.quiz.state().coins()),
                None if self.playing() => format!(
                    "A hint costs {} coins and you have {coins}.",
                    rules.hint_cost
                ),
                None => self.not_playing(),
            },
            QuizCommand::Bonus => {
                if self.quiz.arm_double_bonus() {
                    format!(
                        "2x bonus armed. It costs {} coins if your answer is correct.",
                        rules.bonus_cost
                    )
                } else if !self.playing() {
                    self.not_playing()
                } else if self.quiz.bonus_used() {
                    "The 2x bonus can be used once per quiz.".to_string()
                } else if self.quiz.bonus_armed() {
                    "The 2x bonus is already armed.".to_string()
                } else {
                    format!(
                        "The 2x bonus costs {} coins and you have {coins}.",
                        rules.bonus_cost
                    )
                }
            }
            QuizCommand::Next => match self.quiz.advance() {
                Outcome::Scored { correct, points } => format!(
                    "{}\n{}",
                    verdict(correct, points),
                    render::quiz_status(&self.quiz, locale)?
                ),
                Outcome::Finished {
                    correct,
                    points,
                    score,
                    reward,
                } => format!(
                    "{}\nQuiz complete! Final score {score}, +{reward} coins ({} total).",
                    verdict(correct, points),
                    self.quiz.state().coins()
                ),
                _ if self.playing() => "Choose an answer first with 'quiz answer <1-4>'.".to_string(),
                _ => self.not_playing(),
            },
            QuizCommand::Reset => {
                self.quiz.reset();
                format!(
                    "Back to tier selection ({} coins).",
                    self.quiz.state().coins()
                )
            }
        };
        Ok(text)
    }

    fn calendar_command(&mut self, command: CalendarCommand, today: NaiveDate) -> Result<String> {
        match command {
            CalendarCommand::Show => render::month_view(&self.calendar, self.locale),
            CalendarCommand::Next => {
                self.calendar.change_month(1);
                render::month_view(&self.calendar, self.locale)
            }
            CalendarCommand::Prev => {
                self.calendar.change_month(-1);
                render::month_view(&self.calendar, self.locale)
            }
            CalendarCommand::Day(day) => {
                let cursor = self.calendar.cursor();
                if cursor.date_of(day).is_none() {
                    return Ok(format!(
                        "{} has no day {day}.",
                        render::month_label(cursor.first_day(), self.locale)
                    ));
                }
                let key = cursor.day_key(day);
                render::event_list(
                    &format!("Events on {key}:"),
                    &self.calendar.events_for_day(day),
                    &format!("No events on {key}."),
                )
            }
            CalendarCommand::Upcoming => render::event_list(
                "Upcoming:",
                &self.calendar.upcoming(today),
                "No upcoming events.",
            ),
            CalendarCommand::Add(input) => {
                let event = self.calendar.add_event(input)?;
                Ok(format!(
                    "Added event #{}: {}",
                    event.id,
                    render::event_line(event)
                ))
            }
        }
    }

    fn ledger_command(&mut self, command: LedgerCommand, today: NaiveDate) -> Result<String> {
        match command {
            LedgerCommand::Add {
                kind,
                amount,
                category,
                description,
            } => {
                let recorded = self.ledger.record(NewTransaction {
                    kind,
                    amount,
                    category,
                    description,
                    date: today,
                })?;
                let mut text = format!("Recorded {}", render::transaction_line(recorded));
                if let Some(alert) = self.parental.alert_for(recorded) {
                    warn!(
                        "Large expense {} of {:.2} above threshold {:.2}",
                        alert.transaction_id, alert.amount, alert.threshold
                    );
                    text.push('\n');
                    text.push_str(&render::alert(&alert));
                }
                Ok(text)
            }
            LedgerCommand::List => {
                if self.ledger.entries().is_empty() {
                    return Ok("No transactions yet.".to_string());
                }
                Ok(self
                    .ledger
                    .entries()
                    .iter()
                    .map(render::transaction_line)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            LedgerCommand::Summary => Ok(render::ledger_summary(&self.ledger.summary())),
        }
    }

    fn goal_command(&mut self, command: GoalCommand, today: NaiveDate) -> Result<String> {
        if let GoalCommand::Set {
            target,
            current,
            deadline,
        } = command
        {
            self.goal = SavingsGoal::new(target, current, deadline)?;
            info!("Savings goal set to {:.2} by {}", target, deadline);
        }
        render::goal(&self.goal, today)
    }

    fn parent_command(&mut self, command: ParentCommand) -> Result<String> {
        let updated = match command {
            ParentCommand::Show => return render::parental(&self.parental),
            ParentCommand::Threshold(expense_threshold) => ParentalSettings {
                expense_threshold,
                ..self.parental.clone()
            },
            ParentCommand::Email(parent_email) => ParentalSettings {
                parent_email,
                ..self.parental.clone()
            },
        };
        self.parental.save(updated)?;
        Ok(format!("Saved.\n{}", render::parental(&self.parental)?))
    }
}

fn verdict(correct: bool, points: u32) -> String {
    if correct {
        format!("Correct! +{points} points")
    } else {
        "Wrong answer.".to_string()
    }
}

async fn say<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    Ok(())
}

/// Reads commands line by line until `quit` or end of input.
///
/// Advisor replies are delayed by `reply_delay`. `today` is asked for the
/// date once per line.
///
/// # Errors
/// Returns an error only if reading input or writing output fails.
pub async fn run<R, W, T>(
    shell: &mut Shell,
    input: R,
    mut output: W,
    reply_delay: Duration,
    today: T,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    T: Fn() -> NaiveDate,
{
    say(&mut output, &shell.welcome()).await?;
    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;
        let Some(line) = lines.next_line().await? else {
            info!("Input closed, leaving shell");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                say(&mut output, &format!("{e}. Type 'help' for the command list.")).await?;
                continue;
            }
        };
        if matches!(&command, Command::Ask(q) if !q.trim().is_empty()) && !reply_delay.is_zero()
        {
            tokio::time::sleep(reply_delay).await;
        }

        match shell.handle(command, today()) {
            Ok(Flow::Continue(text)) => say(&mut output, &text).await?,
            Ok(Flow::Quit) => {
                say(&mut output, "Bye!").await?;
                break;
            }
            Err(e) => {
                warn!("Command '{}' failed: {}", line.trim(), e);
                say(&mut output, &e.to_string()).await?;
            }
        }
    }
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        config::app::AppSection,
        errors::Error,
        test_utils::{date, tiny_bank},
    };

    fn config(sample_data: bool) -> AppConfig {
        AppConfig {
            app: AppSection {
                locale: Locale::En,
                sample_data,
                question_bank: None,
            },
            ..AppConfig::default()
        }
    }

    fn shell() -> Shell {
        Shell::new(&config(false), QuestionBank::builtin(), date(2025, 12, 1)).unwrap()
    }

    fn text(shell: &mut Shell, line: &str) -> String {
        match shell.execute(line, date(2025, 12, 1)).unwrap() {
            Flow::Continue(text) => text,
            Flow::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_full_kids_quiz_through_commands() {
        let mut shell = shell();
        let started = text(&mut shell, "quiz start 8-12");
        assert!(started.contains("Question 1/4"));

        for _ in 0..3 {
            text(&mut shell, "quiz answer 1");
            assert!(text(&mut shell, "quiz next").starts_with("Correct! +10 points"));
        }
        text(&mut shell, "quiz answer 1");
        let finished = text(&mut shell, "quiz next");
        assert!(finished.contains("Final score 40, +2 coins (2 total)"));
        assert_eq!(shell.quiz().state().phase(), QuizPhase::Finished);
        assert!(text(&mut shell, "quiz answer 1").contains("quiz reset"));
    }

    #[test]
    fn test_rejected_quiz_moves_are_explained() {
        let mut shell = Shell::new(&config(false), tiny_bank(), date(2025, 12, 1)).unwrap();
        assert!(text(&mut shell, "quiz hint").contains("No quiz in progress"));
        text(&mut shell, "quiz start 18+");
        assert!(text(&mut shell, "quiz hint").contains("costs 3 coins and you have 0"));
        assert!(text(&mut shell, "quiz bonus").contains("costs 5 coins"));
        assert!(text(&mut shell, "quiz next").contains("Choose an answer first"));
        assert!(text(&mut shell, "quiz answer 4").contains("> 4. D"));
        assert!(text(&mut shell, "quiz start 8-12").contains("already running"));
    }

    #[test]
    fn test_large_expense_triggers_parent_alert() {
        let mut shell = shell();
        text(&mut shell, "parent email mom@example.com");
        let small = text(&mut shell, "ledger add expense 50 food lunch");
        assert!(!small.contains("Parent alert"));
        let large = text(&mut shell, "ledger add expense 80 shopping sneakers");
        assert!(large.contains("Parent alert: expense #2 of ₼80.00"));
        assert!(large.contains("email mom@example.com"));
        assert_eq!(
            text(&mut shell, "ledger summary"),
            "Income ₼0.00  Expense ₼130.00  Balance ₼-130.00"
        );
    }

    #[test]
    fn test_validation_errors_are_returned() {
        let mut shell = shell();
        assert!(matches!(
            shell.execute("ledger add expense 10 salary", date(2025, 12, 1)),
            Err(Error::InvalidCategory { .. })
        ));
        assert!(matches!(
            shell.execute("cal add income 2025-12-09", date(2025, 12, 1)),
            Err(Error::MissingField { .. })
        ));
        assert!(matches!(
            shell.execute("parent threshold -3", date(2025, 12, 1)),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            shell.execute("fly away", date(2025, 12, 1)),
            Err(Error::UnknownCommand { .. })
        ));
    }

    #[test]
    fn test_calendar_commands() {
        let mut shell = Shell::new(&config(true), tiny_bank(), date(2025, 12, 10)).unwrap();
        let added = text(&mut shell, "cal add expense 2025-12-09 amount=12 Cinema");
        assert!(added.starts_with("Added event #5"));
        assert!(text(&mut shell, "cal day 9").contains("Cinema"));
        assert_eq!(text(&mut shell, "cal day 10"), "No events on 2025-12-10.");
        assert_eq!(text(&mut shell, "cal day 32"), "December 2025 has no day 32.");

        let upcoming = shell
            .execute("cal upcoming", date(2025, 12, 10))
            .unwrap();
        let Flow::Continue(upcoming) = upcoming else {
            panic!("unexpected quit")
        };
        assert!(!upcoming.contains("Cinema"));
        assert!(upcoming.contains("Birthday Gift"));

        assert!(text(&mut shell, "cal next").starts_with("January 2026"));
        assert!(text(&mut shell, "cal prev").starts_with("December 2025"));
    }

    #[test]
    fn test_language_switch_changes_content() {
        let mut shell = shell();
        text(&mut shell, "lang ru");
        assert_eq!(shell.locale(), Locale::Ru);
        assert!(text(&mut shell, "cal show").starts_with("Декабрь 2025"));
        assert!(text(&mut shell, "ask бюджет?").starts_with("Advisor: Чтобы спланировать"));
    }

    #[tokio::test]
    async fn test_run_loop_until_quit() {
        let mut shell = shell();
        let input: &[u8] = b"help\n\nask how do I save?\nnonsense\ngoal show\nquit\nhelp\n";
        let mut output = Vec::new();

        run(&mut shell, input, &mut output, Duration::ZERO, || {
            date(2025, 12, 1)
        })
        .await
        .unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.starts_with("MoneyWise"));
        assert_eq!(printed.matches("Commands:").count(), 1);
        assert!(printed.contains("Advisor: To save money"));
        assert!(printed.contains("Unknown command: nonsense. Type 'help'"));
        assert!(printed.contains("30 days left"));
        assert!(printed.trim_end().ends_with("Bye!"));
        assert_eq!(shell.chat().messages().len(), 3);
    }

    #[tokio::test]
    async fn test_run_stops_at_end_of_input() {
        let mut shell = shell();
        let input: &[u8] = b"ledger add income 20 gift";
        let mut output = Vec::new();

        run(&mut shell, input, &mut output, Duration::ZERO, || {
            date(2025, 12, 1)
        })
        .await
        .unwrap();

        assert_eq!(shell.ledger().balance(), 20.0);
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.trim_end().ends_with(PROMPT.trim_end()));
    }
}
