use serde::{Deserialize, Serialize};

/// Decoded image ready to be attached to a model request
///
/// Keeps the original encoded bytes for upload alongside the dimensions learned
/// while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            width,
            height,
        }
    }
}

/// Image and prompt captured at submission time
///
/// Owned by the in-flight call and dropped once it resolves.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub image: Bitmap,
    pub prompt: String,
}

impl PendingRequest {
    pub fn new(image: Bitmap, prompt: impl Into<String>) -> Self {
        Self {
            image,
            prompt: prompt.into(),
        }
    }
}

/// Body of a `generateContent` call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationParameters>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One part of a content block: either text or inline binary data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    /// Part kinds this crate does not send or read, kept as raw JSON
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Response from a `generateContent` call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any text parts
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Error envelope returned by the API on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    pub message: String,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_part_serialization() {
        let part = Part::Text {
            text: "describe this".to_string(),
        };
        assert_eq!(serde_json::to_string(&part).unwrap(), r#"{"text":"describe this"}"#);
    }

    #[test]
    fn test_inline_data_serialization() {
        let part = Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_string(&part).unwrap(),
            r#"{"inlineData":{"mimeType":"image/png","data":"AAAA"}}"#
        );
    }

    #[test]
    fn test_request_omits_empty_generation_config() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![],
            }],
            generation_config: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("generationConfig"));
    }

    #[test]
    fn test_generation_parameters_serialization() {
        let params = GenerationParameters {
            temperature: Some(0.4),
            max_output_tokens: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"temperature": 0.4f32}));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "a red "}, {"text": "apple"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("a red apple".to_string()));
        assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), None);
        assert_eq!(
            response.prompt_feedback.and_then(|f| f.block_reason),
            Some("SAFETY".to_string())
        );
    }

    #[test]
    fn test_api_error_envelope_deserialization() {
        let json = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let envelope: ApiErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code, 400);
        assert_eq!(envelope.error.message, "API key not valid");
        assert_eq!(envelope.error.status.as_deref(), Some("INVALID_ARGUMENT"));
    }

    #[test]
    fn test_pending_request_holds_image_and_prompt() {
        let image = Bitmap::new(vec![1, 2, 3], "image/jpeg", 4, 3);
        let request = PendingRequest::new(image.clone(), "what is this?");
        assert_eq!(request.image, image);
        assert_eq!(request.prompt, "what is this?");
    }
}
