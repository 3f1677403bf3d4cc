//! Front-end-facing wrapper around the AI proxy: one typed function per
//! action, normalized errors, and canned fallbacks for the two
//! nice-to-have features that should degrade silently under quota
//! pressure.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::modules::ai::schema::{
    AiErrorKind, ChatMessage, ChatTurnResult, ErrorResponse, ImageVerification, ItemDescription,
    PriceSuggestion, RecommendationResult, ACTION_CHATBOT_TURN, ACTION_DESCRIBE_ITEM,
    ACTION_RECOMMEND_COMPLEMENTS, ACTION_SUGGEST_PRICE, ACTION_VERIFY_IMAGE,
};

#[derive(Error, Debug)]
pub enum AiClientError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("{message}")]
    Service { kind: AiErrorKind, message: String },
    #[error("Invalid response from AI service: {0}")]
    InvalidResponse(String),
}

impl AiClientError {
    pub fn kind(&self) -> AiErrorKind {
        match self {
            AiClientError::Service { kind, .. } => *kind,
            AiClientError::InvalidResponse(_) => AiErrorKind::ParseError,
            AiClientError::RequestError(_) => AiErrorKind::InternalError,
        }
    }
}

#[derive(Clone)]
pub struct AiClient {
    client: Client,
    base_url: String,
}

impl AiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn describe_item(
        &self,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<ItemDescription, AiClientError> {
        self.call(json!({
            "action": ACTION_DESCRIBE_ITEM,
            "imageBase64": image_base64,
            "mimeType": mime_type,
        }))
        .await
    }

    pub async fn suggest_price(
        &self,
        item_name: &str,
        category: &str,
        condition: &str,
        original_price: Option<f64>,
    ) -> Result<PriceSuggestion, AiClientError> {
        self.call(json!({
            "action": ACTION_SUGGEST_PRICE,
            "itemName": item_name,
            "category": category,
            "condition": condition,
            "originalPrice": original_price,
        }))
        .await
    }

    pub async fn verify_image(
        &self,
        image_base64: &str,
        mime_type: &str,
        expected_category: &str,
    ) -> Result<ImageVerification, AiClientError> {
        self.call(json!({
            "action": ACTION_VERIFY_IMAGE,
            "imageBase64": image_base64,
            "mimeType": mime_type,
            "expectedCategory": expected_category,
        }))
        .await
    }

    /// Degrades silently when the upstream quota is exhausted: the user gets
    /// an apology turn with generic quick replies instead of an error.
    pub async fn chatbot_turn(
        &self,
        user_message: &str,
        conversation_history: &[ChatMessage],
    ) -> Result<ChatTurnResult, AiClientError> {
        let result = self
            .call(json!({
                "action": ACTION_CHATBOT_TURN,
                "userMessage": user_message,
                "conversationHistory": conversation_history,
            }))
            .await;

        match result {
            Err(e) if e.kind() == AiErrorKind::QuotaExceeded => Ok(ChatTurnResult {
                message: "I'm sorry, I'm a bit overwhelmed with requests right now. \
                          Please try again in a few minutes!"
                    .to_string(),
                suggestions: vec!["Try later".to_string(), "Contact Support".to_string()],
            }),
            other => other,
        }
    }

    /// Degrades silently when the upstream quota is exhausted: an empty
    /// recommendation list with an explanatory reason, never an error.
    pub async fn recommend_complements(
        &self,
        item_category: &str,
        item_title: &str,
        user_history: Option<&[String]>,
    ) -> Result<RecommendationResult, AiClientError> {
        let result = self
            .call(json!({
                "action": ACTION_RECOMMEND_COMPLEMENTS,
                "itemCategory": item_category,
                "itemTitle": item_title,
                "userHistory": user_history,
            }))
            .await;

        match result {
            Err(e) if e.kind() == AiErrorKind::QuotaExceeded => Ok(RecommendationResult {
                items: vec![],
                reason: "Recommendations temporarily unavailable due to high demand.".to_string(),
            }),
            other => other,
        }
    }

    async fn call<T: DeserializeOwned>(&self, body: serde_json::Value) -> Result<T, AiClientError> {
        let response = self
            .client
            .post(format!("{}/api/ai", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            // The proxy's serialized error tag is the shared classifier;
            // re-deriving the kind from it cannot drift from the proxy's own
            // classification.
            return Err(match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(err) => AiClientError::Service {
                    kind: err.error,
                    message: err.message,
                },
                Err(_) => AiClientError::Service {
                    kind: AiErrorKind::InternalError,
                    message: "Failed to call AI service".to_string(),
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AiClientError::InvalidResponse(e.to_string()))
    }
}
