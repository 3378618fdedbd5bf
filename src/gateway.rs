//! AI Response Gateway
//!
//! Every call to the generative backend goes through [`StudyGateway`]. Callers
//! get either a validated value or a [`GatewayError`]; lower-level transport
//! and parser errors are logged here and never passed on.

use crate::ai::{GenerationConfig, TextGenerator};
use crate::error::GatewayError;
use crate::models::{StudyRequest, MAX_QUESTIONS, MIN_QUESTIONS};
use crate::prompts;
use crate::quiz::{self, QuizPayloadError, QuizQuestion};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const EXPLAIN_FAILED: &str = "Failed to get an answer from the AI. Please try again.";
pub const SUMMARIZE_FAILED: &str = "Failed to summarize the text. Please try again.";
pub const QUIZ_FAILED: &str =
    "Failed to generate the quiz. Please check the provided text and try again.";
pub const QUIZ_INVALID_FORMAT: &str = "Failed to generate the quiz due to an invalid format from the AI. Please try again with a different text.";
pub const QUIZ_INVALID_OPTIONS: &str = "The AI generated a quiz with invalid or insufficient options. Please try again with a different text.";

/// Static per-task generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPreset {
    Explain,
    Summarize,
    Quiz,
}

impl TaskPreset {
    pub fn generation_config(self) -> GenerationConfig {
        match self {
            TaskPreset::Explain => GenerationConfig::sampling(0.5, 0.95, 64),
            TaskPreset::Summarize => GenerationConfig::sampling(0.3, 0.95, 64),
            TaskPreset::Quiz => GenerationConfig::default().with_json_schema(quiz::response_schema()),
        }
    }

    fn transport_message(self) -> &'static str {
        match self {
            TaskPreset::Explain => EXPLAIN_FAILED,
            TaskPreset::Summarize => SUMMARIZE_FAILED,
            TaskPreset::Quiz => QUIZ_FAILED,
        }
    }
}

/// Reject requests that must never reach the backend.
pub fn validate_request(request: &StudyRequest) -> Result<(), GatewayError> {
    let (field, text) = match request {
        StudyRequest::Explain { doubt } => ("doubt", doubt),
        StudyRequest::Summarize { notes } => ("notes", notes),
        StudyRequest::Quiz {
            source,
            question_count,
        } => {
            if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(question_count) {
                return Err(GatewayError::invalid_input(format!(
                    "Number of questions must be between {} and {}.",
                    MIN_QUESTIONS, MAX_QUESTIONS
                )));
            }
            ("source text", source)
        }
    };

    if text.trim().is_empty() {
        return Err(GatewayError::invalid_input(format!(
            "Please enter some {} first.",
            field
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct StudyGateway {
    backend: Arc<dyn TextGenerator>,
}

impl StudyGateway {
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self { backend }
    }

    /// Explanation prose for a doubt. May embed a Mermaid fence block; see
    /// [`crate::diagram::extract_diagram`].
    pub async fn explain(&self, doubt: &str) -> Result<String, GatewayError> {
        let request = StudyRequest::Explain {
            doubt: doubt.trim().to_string(),
        };
        validate_request(&request)?;

        self.invoke(&request, &prompts::explain(doubt.trim()), TaskPreset::Explain)
            .await
    }

    /// Bullet-point condensation of a block of notes.
    pub async fn summarize(&self, notes: &str) -> Result<String, GatewayError> {
        let request = StudyRequest::Summarize {
            notes: notes.trim().to_string(),
        };
        validate_request(&request)?;

        self.invoke(&request, &prompts::summarize(notes.trim()), TaskPreset::Summarize)
            .await
    }

    /// Multiple-choice quiz over `source`, validated before it is returned.
    pub async fn generate_quiz(
        &self,
        source: &str,
        question_count: u32,
    ) -> Result<Vec<QuizQuestion>, GatewayError> {
        let request = StudyRequest::Quiz {
            source: source.trim().to_string(),
            question_count,
        };
        validate_request(&request)?;

        let raw = self
            .invoke(
                &request,
                &prompts::quiz(source.trim(), question_count),
                TaskPreset::Quiz,
            )
            .await?;

        let questions = quiz::parse_quiz(&raw).map_err(|e| {
            error!("Error generating quiz: {}\nPayload: {}", e, raw);
            match e {
                QuizPayloadError::Malformed(_) => GatewayError::format(QUIZ_INVALID_FORMAT),
                QuizPayloadError::Invalid(_) => GatewayError::validation(QUIZ_INVALID_OPTIONS),
            }
        })?;

        if questions.len() != question_count as usize {
            info!(
                "Requested {} questions, backend returned {}",
                question_count,
                questions.len()
            );
        }

        Ok(questions)
    }

    async fn invoke(
        &self,
        request: &StudyRequest,
        prompt: &str,
        preset: TaskPreset,
    ) -> Result<String, GatewayError> {
        let task = request.task();
        debug!("Dispatching {} request ({} prompt chars)", task, prompt.len());

        let config = preset.generation_config();
        match self.backend.generate(prompt, &config).await {
            Ok(text) => {
                info!("Received {} response ({} chars)", task, text.len());
                Ok(text)
            }
            Err(e) => {
                error!("Error during {} request: {}", task, e);
                Err(GatewayError::transport(preset.transport_message()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockTextGenerator, JSON_MIME_TYPE};
    use crate::error::GatewayErrorKind;
    use serde_json::json;

    fn gateway(mock: &MockTextGenerator) -> StudyGateway {
        StudyGateway::new(Arc::new(mock.clone()))
    }

    fn quiz_json(option_counts: &[usize]) -> String {
        let items: Vec<_> = option_counts
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let options: Vec<String> = (0..n).map(|o| format!("Option {o}")).collect();
                json!({
                    "question": format!("Question {i}?"),
                    "options": options,
                    "correctAnswer": "Option 0",
                })
            })
            .collect();
        serde_json::Value::Array(items).to_string()
    }

    #[tokio::test]
    async fn test_explain_returns_prose_unmodified() {
        let prose = "# Heading\n\n```mermaid\ngraph TD\nA-->B\n```\n";
        let mock = MockTextGenerator::new().with_response(prose);

        let result = gateway(&mock).explain("  Explain photosynthesis ").await.unwrap();
        assert_eq!(result, prose);

        let call = mock.last_call().unwrap();
        assert!(call.prompt.contains("Doubt: \"Explain photosynthesis\""));
        assert_eq!(call.config, TaskPreset::Explain.generation_config());
        assert_eq!(call.config.temperature, Some(0.5));
    }

    #[tokio::test]
    async fn test_summarize_uses_lower_temperature() {
        let mock = MockTextGenerator::new().with_response("- point");

        let result = gateway(&mock).summarize("Cells divide by mitosis.").await.unwrap();
        assert_eq!(result, "- point");

        let call = mock.last_call().unwrap();
        assert_eq!(call.config.temperature, Some(0.3));
        assert_eq!(call.config.top_p, Some(0.95));
        assert_eq!(call.config.top_k, Some(64));
        assert!(!call.config.is_structured());
        assert!(call.prompt.contains("Cells divide by mitosis."));
    }

    #[tokio::test]
    async fn test_empty_input_rejected_without_dispatch() {
        let mock = MockTextGenerator::new();
        let gw = gateway(&mock);

        let err = gw.explain("   ").await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::InvalidInput);
        let err = gw.summarize("").await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::InvalidInput);
        let err = gw.generate_quiz("\n\t", 5).await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::InvalidInput);

        assert_eq!(mock.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_question_count_bounds() {
        let mock = MockTextGenerator::new();
        let gw = gateway(&mock);

        for count in [0, MAX_QUESTIONS + 1] {
            let err = gw.generate_quiz("text", count).await.unwrap_err();
            assert_eq!(err.kind(), GatewayErrorKind::InvalidInput);
        }
        assert_eq!(mock.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failures_use_task_messages() {
        let mock = MockTextGenerator::new().with_failure("connection reset");
        let gw = gateway(&mock);

        let err = gw.explain("why?").await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::Transport);
        assert_eq!(err.message(), EXPLAIN_FAILED);

        let err = gw.summarize("notes").await.unwrap_err();
        assert_eq!(err.message(), SUMMARIZE_FAILED);

        let err = gw.generate_quiz("text", 3).await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::Transport);
        assert_eq!(err.message(), QUIZ_FAILED);
    }

    #[tokio::test]
    async fn test_quiz_request_is_structured() {
        let mock = MockTextGenerator::new().with_response(quiz_json(&[4, 4]));

        let quiz = gateway(&mock).generate_quiz("Source text", 2).await.unwrap();
        assert_eq!(quiz.len(), 2);

        let call = mock.last_call().unwrap();
        assert!(call.prompt.contains("exactly 2 questions"));
        assert_eq!(call.config.response_mime_type.as_deref(), Some(JSON_MIME_TYPE));
        assert!(call.config.is_structured());
        assert_eq!(call.config.temperature, None);
    }

    #[tokio::test]
    async fn test_malformed_quiz_is_format_error() {
        let mock = MockTextGenerator::new().with_response("[{\"question\": ");

        let err = gateway(&mock).generate_quiz("text", 1).await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::Format);
        assert_eq!(err.message(), QUIZ_INVALID_FORMAT);
    }

    #[tokio::test]
    async fn test_short_options_is_validation_error() {
        let mock = MockTextGenerator::new().with_response(quiz_json(&[4, 3, 4]));

        let err = gateway(&mock).generate_quiz("text", 3).await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::Validation);
        assert_eq!(err.message(), QUIZ_INVALID_OPTIONS);
    }

    #[tokio::test]
    async fn test_non_array_is_validation_error() {
        let mock = MockTextGenerator::new().with_response("{\"questions\": []}");

        let err = gateway(&mock).generate_quiz("text", 1).await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_count_mismatch_is_passed_through() {
        let mock = MockTextGenerator::new().with_response(quiz_json(&[4, 4, 4]));

        let quiz = gateway(&mock).generate_quiz("text", 5).await.unwrap();
        assert_eq!(quiz.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_quiz_array_is_returned_unchanged() {
        let mock = MockTextGenerator::new().with_response("[]");

        let quiz = gateway(&mock).generate_quiz("text", 1).await.unwrap();
        assert!(quiz.is_empty());
    }

    #[test]
    fn test_validate_request_accepts_bounds() {
        for count in [MIN_QUESTIONS, MAX_QUESTIONS] {
            let request = StudyRequest::Quiz {
                source: "text".to_string(),
                question_count: count,
            };
            assert!(validate_request(&request).is_ok());
        }
    }
}
