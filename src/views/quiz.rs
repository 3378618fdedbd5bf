use super::{RequestState, Ticket, ViewStatus};
use crate::error::GatewayError;
use crate::gateway::StudyGateway;
use crate::models::{MAX_QUESTIONS, MIN_QUESTIONS};
use crate::quiz::{self, AnswerSheet, OptionVerdict, QuizQuestion};

pub const DEFAULT_QUESTION_COUNT: u32 = 5;

/// Quiz generator: source text in, answerable multiple-choice quiz out.
#[derive(Debug)]
pub struct QuizView {
    source_text: String,
    question_count: u32,
    quiz: Option<Vec<QuizQuestion>>,
    answers: AnswerSheet,
    submitted: bool,
    state: RequestState,
}

impl Default for QuizView {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizView {
    pub fn new() -> Self {
        Self {
            source_text: String::new(),
            question_count: DEFAULT_QUESTION_COUNT,
            quiz: None,
            answers: AnswerSheet::new(),
            submitted: false,
            state: RequestState::default(),
        }
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source_text = text.into();
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Set the requested number of questions, clamped to the supported range.
    pub fn set_question_count(&mut self, count: u32) {
        self.question_count = count.clamp(MIN_QUESTIONS, MAX_QUESTIONS);
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn begin_submit(&mut self) -> Option<(Ticket, String, u32)> {
        if self.source_text.trim().is_empty() {
            return None;
        }
        let ticket = self.state.begin()?;
        self.quiz = None;
        self.answers.clear();
        self.submitted = false;
        Some((ticket, self.source_text.clone(), self.question_count))
    }

    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<QuizQuestion>, GatewayError>,
    ) -> bool {
        if !self.state.finish(ticket, &result) {
            return false;
        }
        self.quiz = result.ok();
        true
    }

    pub async fn generate(&mut self, gateway: &StudyGateway) -> bool {
        let Some((ticket, source, count)) = self.begin_submit() else {
            return false;
        };
        let result = gateway.generate_quiz(&source, count).await;
        self.complete(ticket, result)
    }

    pub fn questions(&self) -> Option<&[QuizQuestion]> {
        self.quiz.as_deref()
    }

    /// Record the learner's choice for question `index`.
    ///
    /// Ignored once answers are submitted, or if the index or option does not
    /// belong to the current quiz.
    pub fn select_answer(&mut self, index: usize, option: &str) -> bool {
        if self.submitted {
            return false;
        }
        let valid = self
            .quiz
            .as_ref()
            .and_then(|q| q.get(index))
            .is_some_and(|q| q.options.iter().any(|o| o == option));
        if valid {
            self.answers.insert(index, option.to_string());
        }
        valid
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn all_answered(&self) -> bool {
        self.quiz
            .as_ref()
            .is_some_and(|q| (0..q.len()).all(|i| self.answers.contains_key(&i)))
    }

    /// Lock in the answers and return the score.
    pub fn submit_answers(&mut self) -> Option<usize> {
        self.quiz.as_ref()?;
        self.submitted = true;
        Some(self.score())
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn score(&self) -> usize {
        self.quiz
            .as_deref()
            .map(|q| quiz::score(q, &self.answers))
            .unwrap_or(0)
    }

    /// Display classification of an option; `None` until answers are submitted.
    pub fn verdict(&self, index: usize, option: &str) -> Option<OptionVerdict> {
        if !self.submitted {
            return None;
        }
        let question = self.quiz.as_ref()?.get(index)?;
        Some(question.verdict(option, self.answer(index)))
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn status(&self) -> ViewStatus {
        self.state.status()
    }

    /// Clear the quiz, the answers and the source text.
    pub fn reset(&mut self) {
        self.source_text.clear();
        self.quiz = None;
        self.answers.clear();
        self.submitted = false;
        self.state.reset();
    }
}
