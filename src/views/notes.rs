use super::{RequestState, Ticket, ViewStatus};
use crate::error::GatewayError;
use crate::gateway::StudyGateway;

#[derive(Debug, Default)]
pub struct NoteSummarizerView {
    notes: String,
    summary: Option<String>,
    state: RequestState,
}

impl NoteSummarizerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn begin_submit(&mut self) -> Option<(Ticket, String)> {
        if self.notes.trim().is_empty() {
            return None;
        }
        let ticket = self.state.begin()?;
        self.summary = None;
        Some((ticket, self.notes.clone()))
    }

    pub fn complete(&mut self, ticket: Ticket, result: Result<String, GatewayError>) -> bool {
        if !self.state.finish(ticket, &result) {
            return false;
        }
        self.summary = result.ok();
        true
    }

    pub async fn submit(&mut self, gateway: &StudyGateway) -> bool {
        let Some((ticket, notes)) = self.begin_submit() else {
            return false;
        };
        let result = gateway.summarize(&notes).await;
        self.complete(ticket, result)
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
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

    pub fn reset(&mut self) {
        self.notes.clear();
        self.summary = None;
        self.state.reset();
    }
}
