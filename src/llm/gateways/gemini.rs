//! Gemini Gateway for multimodal generation.
//!
//! This module provides a gateway for Google's Generative Language API, sending an
//! inline image and a text prompt to `generateContent` and returning the generated text.

use crate::error::{Result, ViewerError};
use crate::llm::gateway::{GenerationConfig, ModelGateway};
use crate::llm::models::{
    ApiErrorEnvelope, Bitmap, Content, GenerateContentRequest, GenerateContentResponse,
    InlineData, Part,
};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use tracing::{debug, info, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for connecting to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Option<std::time::Duration>,
    pub generation: GenerationConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("GEMINI_API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout: None,
            generation: GenerationConfig::default(),
        }
    }
}

impl GeminiConfig {
    /// Check that the configuration can authenticate against the API.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ViewerError::ConfigError(
                "GEMINI_API_KEY is not set; add it to the environment or a .env file".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ViewerError::ConfigError("model name is empty".to_string()));
        }
        Ok(())
    }
}

/// Gateway for the Gemini generative model service.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    /// Create a new Gemini gateway with configuration from the environment.
    pub fn new() -> Result<Self> {
        Self::with_config(GeminiConfig::default())
    }

    /// Create a new Gemini gateway with custom configuration.
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    /// Create gateway with custom API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig {
            api_key: api_key.into(),
            ..Default::default()
        })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(GeminiConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn build_request(&self, image: &Bitmap, prompt: &str) -> GenerateContentRequest {
        let data = base64::engine::general_purpose::STANDARD.encode(&image.data);

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data,
                        },
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            generation_config: self.config.generation.to_parameters(),
        }
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn generate(&self, image: &Bitmap, prompt: &str) -> Result<String> {
        info!("Delegating to Gemini for generation");
        debug!(
            model = %self.config.model,
            mime_type = %image.mime_type,
            image_bytes = image.data.len(),
            prompt_chars = prompt.chars().count(),
            "Building generateContent request"
        );

        let body = self.build_request(image, prompt);

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.base_url.trim_end_matches('/'),
                self.config.model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorEnvelope>(&error_text) {
                Ok(envelope) => envelope.error.message,
                Err(_) => error_text,
            };
            warn!(status = status.as_u16(), "Gemini API returned an error");
            return Err(ViewerError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let response_body: GenerateContentResponse = response.json().await?;

        if let Some(reason) =
            response_body.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_ref())
        {
            return Err(ViewerError::GatewayError(format!("Prompt blocked: {}", reason)));
        }

        match response_body.text() {
            Some(text) => Ok(text),
            None => {
                let finish_reason = response_body
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
                    .unwrap_or_default();
                debug!(finish_reason = %finish_reason, "Response carried no text");
                Err(ViewerError::GatewayError("No content in response".to_string()))
            }
        }
    }
}
