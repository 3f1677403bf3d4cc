use axum::{extract::State, http::StatusCode, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::modules::ai::{
    prompts,
    schema::{
        AiErrorKind, AiProxyRequest, ChatbotTurnParams, DescribeItemParams, ErrorResponse,
        RecommendParams, SuggestPriceParams, VerifyImageParams, ACTION_CHATBOT_TURN,
        ACTION_DESCRIBE_ITEM, ACTION_RECOMMEND_COMPLEMENTS, ACTION_SUGGEST_PRICE,
        ACTION_VERIFY_IMAGE,
    },
};
use crate::services::gemini::{ChatTurn, GeminiError, GeminiPart};
use crate::AppState;

type ProxyError = (StatusCode, Json<ErrorResponse>);

pub async fn dispatch(
    State(state): State<AppState>,
    Json(payload): Json<AiProxyRequest>,
) -> Result<Json<Value>, ProxyError> {
    match payload.action.as_str() {
        ACTION_DESCRIBE_ITEM => describe_item(&state, payload.params).await,
        ACTION_SUGGEST_PRICE => suggest_price(&state, payload.params).await,
        ACTION_VERIFY_IMAGE => verify_image(&state, payload.params).await,
        ACTION_CHATBOT_TURN => chatbot_turn(&state, payload.params).await,
        ACTION_RECOMMEND_COMPLEMENTS => recommend_complements(&state, payload.params).await,
        other => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: AiErrorKind::InternalError,
                message: format!("Invalid action: {}", other),
            }),
        )),
    }
}

async fn describe_item(state: &AppState, params: Value) -> Result<Json<Value>, ProxyError> {
    let params: DescribeItemParams = parse_params(params)?;

    let parts = vec![
        GeminiPart::text(prompts::describe_item()),
        GeminiPart::inline_image(params.mime_type, params.image_base64),
    ];

    let text = state.gemini.generate(parts).await.map_err(upstream_failure)?;
    parse_model_json(&text).map(Json)
}

async fn suggest_price(state: &AppState, params: Value) -> Result<Json<Value>, ProxyError> {
    let params: SuggestPriceParams = parse_params(params)?;

    let prompt = prompts::suggest_price(
        &params.item_name,
        &params.category,
        &params.condition,
        params.original_price,
    );

    let text = state
        .gemini
        .generate(vec![GeminiPart::text(prompt)])
        .await
        .map_err(upstream_failure)?;
    parse_model_json(&text).map(Json)
}

async fn verify_image(state: &AppState, params: Value) -> Result<Json<Value>, ProxyError> {
    let params: VerifyImageParams = parse_params(params)?;

    let parts = vec![
        GeminiPart::text(prompts::verify_image(&params.expected_category)),
        GeminiPart::inline_image(params.mime_type, params.image_base64),
    ];

    let text = state.gemini.generate(parts).await.map_err(upstream_failure)?;
    parse_model_json(&text).map(Json)
}

async fn chatbot_turn(state: &AppState, params: Value) -> Result<Json<Value>, ProxyError> {
    let params: ChatbotTurnParams = parse_params(params)?;

    let mut turns = prompts::chat_preamble();
    turns.extend(params.conversation_history.iter().map(|message| {
        // Anything that is not the user is replayed as the model.
        if message.role == "user" {
            ChatTurn::user(message.content.clone())
        } else {
            ChatTurn::model(message.content.clone())
        }
    }));

    let reply = state
        .gemini
        .chat(turns, &params.user_message)
        .await
        .map_err(upstream_failure)?;

    let suggestions = prompts::quick_replies(&params.user_message);

    Ok(Json(serde_json::json!({
        "message": reply,
        "suggestions": suggestions,
    })))
}

async fn recommend_complements(state: &AppState, params: Value) -> Result<Json<Value>, ProxyError> {
    let params: RecommendParams = parse_params(params)?;

    let prompt = prompts::recommend_complements(
        &params.item_category,
        &params.item_title,
        params.user_history.as_deref(),
    );

    let text = state
        .gemini
        .generate(vec![GeminiPart::text(prompt)])
        .await
        .map_err(upstream_failure)?;
    parse_model_json(&text).map(Json)
}

fn parse_params<T>(params: Value) -> Result<T, ProxyError>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(params).map_err(|e| bad_request(e.to_string()))?;
    parsed.validate().map_err(|e| bad_request(e.to_string()))?;
    Ok(parsed)
}

fn bad_request(message: String) -> ProxyError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: AiErrorKind::InternalError,
            message,
        }),
    )
}

/// Removes markdown code-fence markers the model tends to wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Strict parse of the cleaned model output. The raw text never reaches the
/// caller on failure; it is logged server-side only.
fn parse_model_json(text: &str) -> Result<Value, ProxyError> {
    let cleaned = strip_code_fences(text);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(error = %e, raw = %text, "model response is not valid JSON");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: AiErrorKind::ParseError,
                    message: "Failed to parse AI response as JSON".to_string(),
                }),
            ))
        }
    }
}

fn upstream_failure(err: GeminiError) -> ProxyError {
    tracing::error!(error = %err, "upstream model call failed");

    let kind = AiErrorKind::from_upstream_message(&err.to_string());
    let (status, message) = match kind {
        AiErrorKind::ApiKeyInvalid => (
            StatusCode::FORBIDDEN,
            "AI service is currently unavailable. Please try again later or fill in the details manually."
                .to_string(),
        ),
        AiErrorKind::QuotaExceeded => (
            StatusCode::TOO_MANY_REQUESTS,
            "AI service is busy. Please try again later.".to_string(),
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    };

    (status, Json(ErrorResponse { error: kind, message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_tagged_fences() {
        assert_eq!(
            strip_code_fences("```json\n{\"min\":100}\n```"),
            "{\"min\":100}"
        );
    }

    #[test]
    fn strips_bare_fences() {
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn strips_fences_anywhere_in_the_text() {
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn parse_failure_reports_parse_error_without_raw_text() {
        let raw = "Sorry, I can't help with that";
        let (status, Json(body)) = parse_model_json(raw).unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, AiErrorKind::ParseError);
        assert!(!body.message.contains(raw));
    }

    #[test]
    fn quota_failure_maps_to_429() {
        let err = GeminiError::ApiError("429 quota exceeded".to_string());
        let (status, Json(body)) = upstream_failure(err);

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body.error, AiErrorKind::QuotaExceeded);
    }

    #[test]
    fn credential_failure_hides_the_upstream_message() {
        let err = GeminiError::ApiError("403 API key not valid".to_string());
        let (status, Json(body)) = upstream_failure(err);

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error, AiErrorKind::ApiKeyInvalid);
        assert!(!body.message.contains("API key"));
        assert!(body.message.contains("fill in the details manually"));
    }

    #[test]
    fn other_failures_pass_the_message_through() {
        let err = GeminiError::EmptyResponse;
        let (status, Json(body)) = upstream_failure(err);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, AiErrorKind::InternalError);
        assert_eq!(body.message, "Empty response from model");
    }
}
