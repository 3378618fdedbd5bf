//! Presentation state for the three study tools.
//!
//! Each view follows the same submission protocol: `begin_submit` hands out
//! a [`Ticket`] and marks the view as loading, the caller awaits the gateway,
//! then `complete` applies the outcome only if the ticket is still current.
//! While a request is in flight a second `begin_submit` is refused, and a
//! reset invalidates any outstanding ticket so late results are dropped.

pub mod doubt;
pub mod notes;
pub mod quiz;

pub use doubt::DoubtSolverView;
pub use notes::NoteSummarizerView;
pub use quiz::QuizView;

use crate::error::GatewayError;

/// Identifies one submission of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Loading/error bookkeeping shared by all views.
#[derive(Debug, Default)]
pub(crate) struct RequestState {
    generation: u64,
    loading: bool,
    error: Option<String>,
    has_result: bool,
}

impl RequestState {
    pub(crate) fn begin(&mut self) -> Option<Ticket> {
        if self.loading {
            tracing::debug!("Submission ignored: request already in flight");
            return None;
        }
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.has_result = false;
        Some(Ticket(self.generation))
    }

    /// Close out `ticket`. Returns `false` if the ticket is stale and the
    /// result must be discarded.
    pub(crate) fn finish<T>(&mut self, ticket: Ticket, result: &Result<T, GatewayError>) -> bool {
        if !self.loading || ticket.0 != self.generation {
            tracing::debug!("Discarding stale result for ticket {:?}", ticket);
            return false;
        }
        self.loading = false;
        match result {
            Ok(_) => self.has_result = true,
            Err(e) => self.error = Some(e.message().to_string()),
        }
        true
    }

    pub(crate) fn reset(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.error = None;
        self.has_result = false;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn status(&self) -> ViewStatus {
        if self.loading {
            ViewStatus::InFlight
        } else if self.error.is_some() {
            ViewStatus::Failed
        } else if self.has_result {
            ViewStatus::Succeeded
        } else {
            ViewStatus::Idle
        }
    }
}
