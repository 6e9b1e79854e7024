use crate::error::Result;
use crate::llm::models::{Bitmap, GenerationParameters};
use async_trait::async_trait;

/// Configuration for a generation request
///
/// Unset values leave the choice to the model.
#[derive(Debug, Clone, Default)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    pub(crate) fn to_parameters(&self) -> Option<GenerationParameters> {
        if self.temperature.is_none() && self.max_output_tokens.is_none() {
            return None;
        }

        Some(GenerationParameters {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        })
    }
}

/// Abstract interface for multimodal model providers
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generate text from an image and a prompt
    async fn generate(&self, image: &Bitmap, prompt: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_default() {
        let config = GenerationConfig::default();

        assert_eq!(config.temperature, None);
        assert_eq!(config.max_output_tokens, None);
        assert!(config.to_parameters().is_none());
    }

    #[test]
    fn test_generation_config_custom() {
        let config = GenerationConfig {
            temperature: Some(0.5),
            max_output_tokens: Some(1024),
        };

        let params = config.to_parameters().unwrap();
        assert_eq!(params.temperature, Some(0.5));
        assert_eq!(params.max_output_tokens, Some(1024));
    }

    #[test]
    fn test_generation_config_partial() {
        let config = GenerationConfig {
            temperature: None,
            max_output_tokens: Some(400),
        };

        let params = config.to_parameters().unwrap();
        assert_eq!(params.temperature, None);
        assert_eq!(params.max_output_tokens, Some(400));
    }
}
