//! Generative backend integration
//!
//! [`TextGenerator`] is the seam between the gateway and the model provider:
//! one prompt plus one [`GenerationConfig`] in, raw response text out.

pub mod gemini;
pub mod generation;
pub mod mock;

pub use gemini::GeminiTextClient;
pub use generation::{GenerationConfig, Schema, SchemaType, JSON_MIME_TYPE};
pub use mock::MockTextGenerator;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;
}
