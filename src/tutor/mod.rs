//! Tutor dialogue adapter
//!
//! Forwards steps and learner questions to a chat-completion backend. Every
//! call is an independent suspension point and never touches session state,
//! so a failed or slow call cannot corrupt a recorded step sequence. Failures
//! surface as [`TutorError::DialogueUnavailable`]; [`degrade`] turns them into
//! a message the shell can show in place of the reply.

pub mod evaluation;
pub mod prompts;
pub mod transport;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TutorError};
use crate::recorder::{Discipline, Step};

pub use evaluation::Evaluation;
pub use transport::{ChatMessage, ChatRequest, ChatTransport, OpenAiTransport, Role};

/// Learner expertise used to pitch explanations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnerLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl LearnerLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LearnerLevel::Beginner => "beginner",
            LearnerLevel::Intermediate => "intermediate",
            LearnerLevel::Advanced => "advanced",
        }
    }

    /// "a beginner", "an intermediate", "an advanced"
    pub fn with_article(self) -> String {
        match self {
            LearnerLevel::Beginner => format!("a {}", self.as_str()),
            LearnerLevel::Intermediate | LearnerLevel::Advanced => format!("an {}", self.as_str()),
        }
    }
}

impl fmt::Display for LearnerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message shown when no API key is configured
pub const NOT_CONFIGURED_MESSAGE: &str =
    "GPT integration not available. Please set your OpenAI API key.";

/// Replace a failed reply with a visible, human-readable message.
///
/// `action` names what was requested ("explanation", "hint", "response").
pub fn degrade(result: Result<String>, action: &str) -> String {
    match result {
        Ok(text) => text,
        Err(e) if e.is_missing_credential() => NOT_CONFIGURED_MESSAGE.to_string(),
        Err(e) => {
            warn!("dialogue degraded ({}): {}", action, e);
            format!("Error getting {}: {}", action, reason(&e))
        }
    }
}

fn reason(err: &TutorError) -> String {
    match err {
        TutorError::DialogueUnavailable(reason) => reason.clone(),
        other => other.to_string(),
    }
}

/// Dialogue adapter over a chat transport
pub struct Tutor<T: ChatTransport> {
    transport: T,
}

impl<T: ChatTransport> Tutor<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Explain one recorded step
    pub async fn explain_step(
        &self,
        discipline: Discipline,
        step: &Step,
        level: LearnerLevel,
    ) -> Result<String> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(prompts::TUTOR_SYSTEM),
                ChatMessage::user(prompts::explain_step(discipline, step, level)),
            ],
            max_tokens: 250,
            temperature: 0.7,
        };
        self.transport.complete(request).await
    }

    /// Hint for a learner question
    pub async fn hint(
        &self,
        question: &str,
        discipline: Discipline,
        level: LearnerLevel,
    ) -> Result<String> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(prompts::TUTOR_SYSTEM),
                ChatMessage::user(prompts::hint(question, discipline, level)),
            ],
            max_tokens: 150,
            temperature: 0.7,
        };
        self.transport.complete(request).await
    }

    /// Continue a conversation; `history` holds prior user/assistant turns
    /// ending with the new question.
    pub async fn chat(
        &self,
        history: &[ChatMessage],
        discipline: Discipline,
        level: LearnerLevel,
    ) -> Result<String> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(prompts::chat_system(discipline, level)));
        messages.extend(history.iter().cloned());

        let request = ChatRequest {
            messages,
            max_tokens: 500,
            temperature: 0.7,
        };
        self.transport.complete(request).await
    }

    /// Grade an answer. Never fails: unreachable backend or unparseable
    /// output yields a fallback record.
    pub async fn evaluate_answer(
        &self,
        student_answer: &str,
        correct_answer: &str,
        discipline: Discipline,
        context: Option<&str>,
    ) -> Evaluation {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(prompts::EVALUATOR_SYSTEM),
                ChatMessage::user(prompts::evaluate(
                    student_answer,
                    correct_answer,
                    discipline,
                    context,
                )),
            ],
            max_tokens: 250,
            temperature: 0.3,
        };

        match self.transport.complete(request).await {
            Ok(reply) => Evaluation::from_reply(&reply),
            Err(e) if e.is_missing_credential() => Evaluation {
                score: 0,
                feedback: NOT_CONFIGURED_MESSAGE.to_string(),
                misconceptions: "Unable to evaluate due to an error.".to_string(),
            },
            Err(e) => {
                warn!("evaluation degraded: {}", e);
                Evaluation::unavailable(&reason(&e))
            }
        }
    }
}
