use super::{RequestState, Ticket, ViewStatus};
use crate::diagram::extract_diagram;
use crate::error::GatewayError;
use crate::gateway::StudyGateway;

pub const DIAGRAM_RENDER_FAILED: &str = "Failed to render the diagram.";

/// Doubt solver: free-text question in, explanation plus optional diagram out.
#[derive(Debug, Default)]
pub struct DoubtSolverView {
    doubt: String,
    explanation: String,
    diagram: Option<String>,
    render_pending: bool,
    state: RequestState,
}

impl DoubtSolverView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_doubt(&mut self, doubt: impl Into<String>) {
        self.doubt = doubt.into();
    }

    pub fn doubt(&self) -> &str {
        &self.doubt
    }

    /// Start a submission. Returns `None` for blank input or while a request
    /// is already in flight.
    pub fn begin_submit(&mut self) -> Option<(Ticket, String)> {
        if self.doubt.trim().is_empty() {
            return None;
        }
        let ticket = self.state.begin()?;
        self.explanation.clear();
        self.diagram = None;
        self.render_pending = false;
        Some((ticket, self.doubt.clone()))
    }

    /// Apply a gateway result. Returns `false` if it was discarded as stale.
    pub fn complete(&mut self, ticket: Ticket, result: Result<String, GatewayError>) -> bool {
        if !self.state.finish(ticket, &result) {
            return false;
        }
        if let Ok(text) = result {
            let extracted = extract_diagram(&text);
            self.explanation = extracted.prose;
            self.render_pending = extracted.diagram.is_some();
            self.diagram = extracted.diagram;
        }
        true
    }

    pub async fn submit(&mut self, gateway: &StudyGateway) -> bool {
        let Some((ticket, doubt)) = self.begin_submit() else {
            return false;
        };
        let result = gateway.explain(&doubt).await;
        self.complete(ticket, result)
    }

    /// Diagram markup awaiting rendering. Fires once per new diagram.
    pub fn take_render_request(&mut self) -> Option<String> {
        if !self.render_pending {
            return None;
        }
        self.render_pending = false;
        self.diagram.clone()
    }

    /// Record that the renderer rejected the diagram markup.
    pub fn report_render_failure(&mut self, detail: &str) {
        tracing::error!("Mermaid rendering error: {}", detail);
        self.state.set_error(DIAGRAM_RENDER_FAILED);
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn diagram(&self) -> Option<&str> {
        self.diagram.as_deref()
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
        self.doubt.clear();
        self.explanation.clear();
        self.diagram = None;
        self.render_pending = false;
        self.state.reset();
    }
}
