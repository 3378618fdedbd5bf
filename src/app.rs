//! Application shell: one gateway shared by three tabbed study tools.

use crate::ai::{GeminiTextClient, TextGenerator};
use crate::gateway::StudyGateway;
use crate::models::Config;
use crate::views::{DoubtSolverView, NoteSummarizerView, QuizView};
use crate::Result;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Solver,
    Summarizer,
    Quiz,
}

/// Holds the active tab and the state of every view.
pub struct App {
    gateway: StudyGateway,
    active_tab: Tab,
    solver: DoubtSolverView,
    summarizer: NoteSummarizerView,
    quiz: QuizView,
}

impl App {
    /// Build an app around an already-constructed backend.
    ///
    /// Tests and harnesses use this to inject a mock generator.
    pub fn with_backend(backend: Arc<dyn TextGenerator>) -> Self {
        Self {
            gateway: StudyGateway::new(backend),
            active_tab: Tab::default(),
            solver: DoubtSolverView::new(),
            summarizer: NoteSummarizerView::new(),
            quiz: QuizView::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = GeminiTextClient::from_config(config);
        info!(
            "AI provider: Gemini (model: {}, timeout: {:?})",
            client.model(),
            config.request_timeout
        );
        Self::with_backend(Arc::new(client))
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::from_config(&config))
    }

    pub fn gateway(&self) -> &StudyGateway {
        &self.gateway
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Switch tabs. The view being left is reset, so a result still in
    /// flight for it will be discarded when it arrives.
    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.active_tab {
            return;
        }
        match self.active_tab {
            Tab::Solver => self.solver.reset(),
            Tab::Summarizer => self.summarizer.reset(),
            Tab::Quiz => self.quiz.reset(),
        }
        self.active_tab = tab;
    }

    pub fn solver(&self) -> &DoubtSolverView {
        &self.solver
    }

    pub fn solver_mut(&mut self) -> &mut DoubtSolverView {
        &mut self.solver
    }

    pub fn summarizer(&self) -> &NoteSummarizerView {
        &self.summarizer
    }

    pub fn summarizer_mut(&mut self) -> &mut NoteSummarizerView {
        &mut self.summarizer
    }

    pub fn quiz(&self) -> &QuizView {
        &self.quiz
    }

    pub fn quiz_mut(&mut self) -> &mut QuizView {
        &mut self.quiz
    }

    /// Explain `doubt` in the solver view.
    pub async fn explain(&mut self, doubt: &str) -> bool {
        self.select_tab(Tab::Solver);
        self.solver.set_doubt(doubt);
        self.solver.submit(&self.gateway).await
    }

    /// Summarize `notes` in the summarizer view.
    pub async fn summarize(&mut self, notes: &str) -> bool {
        self.select_tab(Tab::Summarizer);
        self.summarizer.set_notes(notes);
        self.summarizer.submit(&self.gateway).await
    }

    /// Generate a quiz over `source` in the quiz view.
    pub async fn generate_quiz(&mut self, source: &str, question_count: u32) -> bool {
        self.select_tab(Tab::Quiz);
        self.quiz.set_source_text(source);
        self.quiz.set_question_count(question_count);
        self.quiz.generate(&self.gateway).await
    }
}
