//! Gemini dispatch (one prompt round trip per call)
//!
//! Builds a `generateContent` request from instructions plus an optional
//! inline image and/or free text, and returns the first candidate's text.
//! Transport failures (network, auth, non-2xx, empty candidates) surface
//! as `ApiCall` errors; nothing here inspects the reply payload.

use crate::config::Config;
use crate::error::{RecircleError, Result};
use crate::media::ImagePayload;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Dispatch seam. The pipeline talks to the service through this trait so
/// tests can drive it with canned replies.
#[allow(async_fn_in_trait)]
pub trait Dispatch {
    /// One round trip: instructions plus an optional inline image and/or
    /// free text. The caller supplies at least one of the two inputs.
    async fn dispatch(
        &self,
        instructions: &str,
        image: Option<&ImagePayload>,
        free_text: Option<&str>,
    ) -> Result<String>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    url: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| RecircleError::ApiCall(format!("client init: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            url: format!(
                "{}/{}:generateContent",
                config.api_url.trim_end_matches('/'),
                config.model
            ),
        })
    }
}

impl Dispatch for GeminiClient {
    async fn dispatch(
        &self,
        instructions: &str,
        image: Option<&ImagePayload>,
        free_text: Option<&str>,
    ) -> Result<String> {
        let mut parts = vec![Part::Text {
            text: instructions.to_string(),
        }];
        if let Some(text) = free_text {
            parts.push(Part::Text {
                text: text.to_string(),
            });
        }
        if let Some(img) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: img.mime_type.clone(),
                    data: img.data.clone(),
                },
            });
        }

        let request = GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .http
            .post(format!("{}?key={}", self.url, self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| RecircleError::ApiCall(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecircleError::ApiCall(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| RecircleError::ApiParse(format!("invalid response body: {}", e)))?;

        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| RecircleError::ApiCall("empty response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_request_serialize() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: "test prompt".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                response_mime_type: "application/json".to_string(),
            },
        };

        let json = serde_json::to_string(&request).expect("serialize failed");
        assert!(json.contains("\"contents\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"temperature\":0.1"));
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
    }

    #[test]
    fn test_part_text_serialize() {
        let part = Part::Text {
            text: "Hello".to_string(),
        };
        let json = serde_json::to_string(&part).expect("serialize failed");
        assert_eq!(json, r#"{"text":"Hello"}"#);
    }

    #[test]
    fn test_part_inline_data_serialize() {
        let part = Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/jpeg".to_string(),
                data: "base64data".to_string(),
            },
        };
        let json = serde_json::to_string(&part).expect("serialize failed");
        assert!(json.contains("\"inline_data\""));
        assert!(json.contains("\"mime_type\":\"image/jpeg\""));
        assert!(json.contains("\"data\":\"base64data\""));
    }

    #[test]
    fn test_gemini_response_deserialize() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "{\"items\": []}"
                    }]
                }
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].content.parts.len(), 1);
        assert!(response.candidates[0].content.parts[0].text.contains("items"));
    }

    #[test]
    fn test_gemini_response_deserialize_no_candidates() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"candidates": []}"#).expect("deserialize failed");
        assert!(response.candidates.is_empty());
    }
}
