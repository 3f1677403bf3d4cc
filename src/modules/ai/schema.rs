use serde::{Deserialize, Serialize};
use validator::Validate;

pub const ACTION_DESCRIBE_ITEM: &str = "describe-item";
pub const ACTION_SUGGEST_PRICE: &str = "suggest-price";
pub const ACTION_VERIFY_IMAGE: &str = "verify-image";
pub const ACTION_CHATBOT_TURN: &str = "chatbot-turn";
pub const ACTION_RECOMMEND_COMPLEMENTS: &str = "recommend-complements";

#[derive(Debug, Deserialize)]
pub struct AiProxyRequest {
    pub action: String,
    #[serde(flatten)]
    pub params: serde_json::Value,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DescribeItemParams {
    #[validate(length(min = 1, message = "Image data cannot be empty"))]
    pub image_base64: String,
    #[validate(length(min = 1, message = "MIME type cannot be empty"))]
    pub mime_type: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SuggestPriceParams {
    #[validate(length(min = 1, message = "Item name cannot be empty"))]
    pub item_name: String,
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: String,
    #[validate(length(min = 1, message = "Condition cannot be empty"))]
    pub condition: String,
    pub original_price: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyImageParams {
    #[validate(length(min = 1, message = "Image data cannot be empty"))]
    pub image_base64: String,
    #[validate(length(min = 1, message = "MIME type cannot be empty"))]
    pub mime_type: String,
    #[validate(length(min = 1, message = "Expected category cannot be empty"))]
    pub expected_category: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotTurnParams {
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub user_message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendParams {
    #[validate(length(min = 1, message = "Item category cannot be empty"))]
    pub item_category: String,
    #[validate(length(min = 1, message = "Item title cannot be empty"))]
    pub item_title: String,
    pub user_history: Option<Vec<String>>,
}

/// One prior turn of the chatbot conversation, in caller order. The proxy
/// holds no session state; the full history travels with every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescription {
    pub title: String,
    pub description: String,
    /// Plain string at this layer. The model is not trusted to stay
    /// in-domain; callers coerce through `listing::model::ItemCategory`.
    pub category: String,
    pub condition: String,
    pub suggested_price: PriceRange,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub per_day: f64,
}

/// Advisory only. min <= recommended <= max is not enforced anywhere in the
/// proxy; callers must not rely on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSuggestion {
    pub min: f64,
    pub max: f64,
    pub recommended: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageVerification {
    pub is_valid: bool,
    pub confidence: u32,
    pub detected_category: String,
    #[serde(default)]
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnResult {
    pub message: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    #[serde(default)]
    pub items: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiErrorKind {
    #[serde(rename = "QUOTA_EXCEEDED")]
    QuotaExceeded,
    #[serde(rename = "API_KEY_INVALID")]
    ApiKeyInvalid,
    #[serde(rename = "PARSE_ERROR")]
    ParseError,
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl AiErrorKind {
    /// The one classification heuristic for opaque upstream failure text.
    /// Both the proxy and the client wrapper derive error kinds through this
    /// module, so the two passes cannot disagree. Substring sniffing of an
    /// English error message is brittle; it lives in this single spot so a
    /// structured-code classifier can replace it without touching call sites.
    pub fn from_upstream_message(message: &str) -> AiErrorKind {
        if message.contains("403") || message.contains("API key") || message.contains("leaked") {
            AiErrorKind::ApiKeyInvalid
        } else if message.contains("429") || message.contains("quota") {
            AiErrorKind::QuotaExceeded
        } else {
            AiErrorKind::InternalError
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: AiErrorKind,
    pub message: String,
}
