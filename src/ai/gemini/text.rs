use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse};
use crate::ai::{GenerationConfig, TextGenerator};
use crate::models::Config;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// [`TextGenerator`] backed by Gemini's `generateContent` endpoint.
pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, model, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = Self::new(
            config.api_key.clone(),
            config.model.clone(),
            config.request_timeout,
        );
        client.with_base_url(config.base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }
}

#[async_trait]
impl TextGenerator for GeminiTextClient {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt.to_string())],
            generation_config: config,
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        response.text().ok_or_else(|| {
            let reason = response.finish_reason().unwrap_or("none");
            tracing::error!("Gemini returned no text (finish reason: {})", reason);
            Error::AiProvider(format!(
                "No text in Gemini response (finish reason: {})",
                reason
            ))
        })
    }
}
