//! Command dispatch: turns one inbound chat message into one reply.
//!
//! This is the protocol layer that transports call. It checks for an
//! outstanding task before deciding between issuing and evaluating, and
//! chains a new task after every answer in learning mode.

use crate::engine::QuizEngine;
use crate::error::QuizError;
use crate::model::{UserId, LEARNING_TASK_SIZE};

/// Static usage text for `/help` and `/start`.
pub const HELP_TEXT: &str = "\
I send you a few words and expect their translations back.
Answers are case sensitive and must keep diacritics (š, đ, č, ć, ž).
Write every answer on its own line, in the same order as the questions.
For verbs give the infinitive and the first person singular.

Examples:
- tidy up, calm down - sređivati sređujem
- snowman - Sneško Belić
- room - soba
- Serbia (Serb, Serbian woman) - Srbija (Srbin Srpkinja)

Commands:
/help - show this text
/set N - give N words per task
/learn - learning mode: one word at a time, a new one right after each answer (/set N to leave)
/rate - your share of correct answers
anything else - get a task, or answer the current one";

/// A parsed inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text: request a task or answer the outstanding one.
    Answer,
    Help,
    /// `/set N`; `None` when the argument is missing or not a number.
    SetTaskSize(Option<usize>),
    Learn,
    Rate,
}

impl Command {
    /// Classify a message by its first whitespace-separated token.
    pub fn parse(text: &str) -> Self {
        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("/help") | Some("/start") | Some("/старт") => Command::Help,
            Some("/set") => Command::SetTaskSize(tokens.next().and_then(|v| v.parse().ok())),
            Some("/learn") => Command::Learn,
            Some("/rate") => Command::Rate,
            _ => Command::Answer,
        }
    }
}

/// One user action as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub user_id: UserId,
    pub display_name: String,
    pub text: String,
}

impl InboundMessage {
    pub fn new(user_id: UserId, display_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            text: text.into(),
        }
    }
}

/// Routes messages to the quiz engine.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    quiz: QuizEngine,
}

impl Dispatcher {
    pub fn new(quiz: QuizEngine) -> Self {
        Self { quiz }
    }

    pub fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }

    /// Handle one message and return the text to send back verbatim.
    pub fn handle(&self, message: &InboundMessage) -> String {
        let id = message.user_id;
        let store = self.quiz.store();
        if store.ensure_user(id, &message.display_name) {
            tracing::info!(user = id, name = %message.display_name, "new user");
        }

        match Command::parse(&message.text) {
            Command::Answer => self.answer(id, &message.text),
            Command::Help => HELP_TEXT.to_string(),
            Command::SetTaskSize(requested) => self.set_task_size(id, requested),
            Command::Learn => self.learn(id),
            Command::Rate => match self.quiz.rate(id) {
                Ok(rate) => format!("Your success rate is {rate}%!"),
                Err(QuizError::EmptyHistory(_)) => {
                    "You have not answered anything yet. Send any message to get a task."
                        .to_string()
                }
                Err(e) => failure_text(&e),
            },
        }
    }

    fn answer(&self, id: UserId, text: &str) -> String {
        if !self.quiz.store().has_outstanding_task(id) {
            return self.issue_task(id);
        }

        let answers: Vec<&str> = text.split('\n').collect();
        match self.quiz.evaluate(id, &answers) {
            Ok(evaluation) => {
                let mut reply = evaluation.to_string();
                if self.quiz.store().is_learning_mode(id) {
                    reply.push_str("\n\n");
                    reply.push_str(&self.issue_task(id));
                }
                reply
            }
            Err(QuizError::NoOutstandingTask(_)) => self.issue_task(id),
            Err(e) => failure_text(&e),
        }
    }

    /// Invalid or missing sizes fall back to the default; sizes larger than
    /// the dictionary are clamped to it.
    fn set_task_size(&self, id: UserId, requested: Option<usize>) -> String {
        let store = self.quiz.store();
        let dictionary_size = self.quiz.dictionary().len();
        let size = match requested {
            Some(n) if n >= 1 => n,
            _ => {
                tracing::debug!(user = id, "invalid /set argument, using default");
                store.default_task_size()
            }
        };
        let size = size.min(dictionary_size);

        match store.set_task_size(id, size) {
            Ok(size) if size == LEARNING_TASK_SIZE => {
                "Learning mode is on: one word at a time.".to_string()
            }
            Ok(size) => format!("You will get {size} words per task."),
            Err(e) => failure_text(&e),
        }
    }

    fn learn(&self, id: UserId) -> String {
        if let Err(e) = self.quiz.store().set_task_size(id, LEARNING_TASK_SIZE) {
            return failure_text(&e);
        }
        if self.quiz.store().has_outstanding_task(id) {
            "Learning mode is on. Answer your current task first.".to_string()
        } else {
            self.issue_task(id)
        }
    }

    fn issue_task(&self, id: UserId) -> String {
        match self.quiz.generate(id) {
            Ok(questions) => task_prompt(&questions),
            Err(e) => failure_text(&e),
        }
    }
}

/// The text presenting a new task.
pub fn task_prompt(questions: &[String]) -> String {
    let noun = if questions.len() == 1 { "word" } else { "words" };
    format!(
        "Translate {} {noun} from our dictionary, one per line, in this order:\n\n{}",
        questions.len(),
        questions.join("\n")
    )
}

fn failure_text(err: &QuizError) -> String {
    tracing::warn!("request failed: {err}");
    match err {
        QuizError::InvalidTaskSize { size: 0, .. } => {
            "Your task size is not set. Use /set N to pick one.".to_string()
        }
        QuizError::InvalidTaskSize {
            size,
            dictionary_size,
        } => format!(
            "Your task size ({size}) is larger than the dictionary ({dictionary_size} words). \
             Use /set N to pick a smaller one."
        ),
        other => format!("Something went wrong: {other}"),
    }
}
