//! Study assistant - AI explanations, note summaries and quizzes for learners
//!
//! All generative work goes through [`gateway::StudyGateway`], which talks to
//! the Gemini API, validates what comes back and normalizes failures. The
//! [`views`] module holds the presentation state of the three study tools.

pub mod ai;
pub mod app;
pub mod diagram;
pub mod error;
pub mod gateway;
pub mod models;
pub mod prompts;
pub mod quiz;
pub mod views;

pub use error::{Error, GatewayError, GatewayErrorKind, Result};
