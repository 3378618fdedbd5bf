//! Quiz questions: structured-payload validation and answer scoring.

use crate::ai::Schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const OPTIONS_PER_QUESTION: usize = 4;

/// One multiple-choice question as produced by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    /// How `option` should be shown once answers have been submitted.
    pub fn verdict(&self, option: &str, chosen: Option<&str>) -> OptionVerdict {
        if self.is_correct(option) {
            OptionVerdict::Correct
        } else if chosen == Some(option) {
            OptionVerdict::Incorrect
        } else {
            OptionVerdict::Neutral
        }
    }

    fn check(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question text is empty".to_string());
        }
        if self.options.len() < OPTIONS_PER_QUESTION {
            return Err(format!(
                "expected at least {} options, got {}",
                OPTIONS_PER_QUESTION,
                self.options.len()
            ));
        }
        if let Some(pos) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(format!("option {} is empty", pos));
        }
        if !self.options.iter().any(|o| o == &self.correct_answer) {
            return Err(format!(
                "correct answer '{}' is not one of the options",
                self.correct_answer
            ));
        }
        Ok(())
    }
}

/// Post-submission classification of a single option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionVerdict {
    /// The option is the correct answer.
    Correct,
    /// The learner picked this option and it is wrong.
    Incorrect,
    Neutral,
}

#[derive(Error, Debug)]
pub enum QuizPayloadError {
    #[error("quiz payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("quiz payload is invalid: {0}")]
    Invalid(String),
}

/// Response schema requested for quiz generation.
pub fn response_schema() -> Schema {
    Schema::array(
        Schema::object()
            .property(
                "question",
                Schema::string().describe("The multiple-choice question."),
            )
            .property(
                "options",
                Schema::array(Schema::string())
                    .exact_len(OPTIONS_PER_QUESTION as u32)
                    .describe("An array of 4 possible answers."),
            )
            .property(
                "correctAnswer",
                Schema::string().describe("The correct answer from the options array."),
            ),
    )
}

/// Parse and validate a structured quiz payload.
///
/// Malformed JSON is reported separately from a well-formed payload with the
/// wrong shape. On success the questions are returned in payload order.
pub fn parse_quiz(raw: &str) -> Result<Vec<QuizQuestion>, QuizPayloadError> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(QuizPayloadError::Invalid(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    if items.is_empty() {
        tracing::warn!("Quiz payload contains no questions");
    }

    let mut questions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let question: QuizQuestion = serde_json::from_value(item).map_err(|e| {
            QuizPayloadError::Invalid(format!("question {}: {}", index, e))
        })?;
        question
            .check()
            .map_err(|reason| QuizPayloadError::Invalid(format!("question {}: {}", index, reason)))?;
        if question.options.len() > OPTIONS_PER_QUESTION {
            tracing::warn!(
                "Question {} has {} options (expected {}), passing through",
                index,
                question.options.len(),
                OPTIONS_PER_QUESTION
            );
        }
        questions.push(question);
    }

    Ok(questions)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Learner answers keyed by question index.
pub type AnswerSheet = BTreeMap<usize, String>;

/// Number of answered questions whose chosen option equals the correct answer.
pub fn score(questions: &[QuizQuestion], answers: &AnswerSheet) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(index, q)| answers.get(index).is_some_and(|a| q.is_correct(a)))
        .count()
}
