use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::gemini::GeminiConfig;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Missing API key")]
    MissingApiKey,
    #[error("Empty response from model")]
    EmptyResponse,
}

#[derive(Debug, Clone, Serialize)]
pub enum GeminiPart {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "inlineData")]
    InlineData {
        #[serde(rename = "mimeType")]
        mime_type: String,
        data: String,
    },
}

impl GeminiPart {
    pub fn text(text: impl Into<String>) -> Self {
        GeminiPart::Text(text.into())
    }

    pub fn inline_image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        GeminiPart::InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: String,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new() -> Result<Self, GeminiError> {
        Self::with_config(GeminiConfig::from_env()?)
    }

    pub fn with_config(config: GeminiConfig) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
            model: config.model,
        })
    }

    /// Single user turn, text-only or text plus inline image. One attempt,
    /// no retry.
    pub async fn generate(&self, parts: Vec<GeminiPart>) -> Result<String, GeminiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        };

        self.send(request).await
    }

    /// Stateless multi-turn completion: replays the supplied turns in caller
    /// order, then appends the new user message. No session state is held
    /// between calls.
    pub async fn chat(
        &self,
        turns: Vec<ChatTurn>,
        message: &str,
    ) -> Result<String, GeminiError> {
        let mut contents: Vec<Content> = turns
            .into_iter()
            .map(|t| Content {
                role: t.role,
                parts: vec![GeminiPart::Text(t.text)],
            })
            .collect();

        contents.push(Content {
            role: "user".to_string(),
            parts: vec![GeminiPart::Text(message.to_string())],
        });

        self.send(GenerateRequest { contents }).await
    }

    async fn send(&self, request: GenerateRequest) -> Result<String, GeminiError> {
        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
                return Err(GeminiError::ApiError(format!(
                    "{} {}",
                    status.as_u16(),
                    error_response.error.message
                )));
            }
            return Err(GeminiError::ApiError(format!(
                "{} {}",
                status.as_u16(),
                error_text
            )));
        }

        let generate_response: GenerateResponse = response.json().await?;

        let text = generate_response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        Ok(text)
    }
}
