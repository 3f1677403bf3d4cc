mod common;

use campusrent_ai::client::{AiClient, AiClientError};
use campusrent_ai::modules::ai::schema::{AiErrorKind, ChatMessage};

use common::{proxy_app, MockUpstream};

/// The real proxy served over a loopback socket, with the client wrapper
/// pointed at it. Exercises the full chain: client -> proxy -> mock model.
async fn setup() -> (AiClient, MockUpstream) {
    let (mock, base_url) = MockUpstream::start().await;
    let app = proxy_app(&base_url);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (AiClient::new(format!("http://{}", addr)), mock)
}

#[tokio::test]
async fn test_suggest_price_returns_typed_suggestion() {
    let (client, mock) = setup().await;
    mock.reply_with_text(
        "```json\n{\"min\":100,\"max\":200,\"recommended\":150,\"reasoning\":\"Mid-range\"}\n```",
    );

    let suggestion = client
        .suggest_price("Acoustic Guitar", "Musical Instruments", "Fair", None)
        .await
        .unwrap();

    assert_eq!(suggestion.min, 100.0);
    assert_eq!(suggestion.max, 200.0);
    assert_eq!(suggestion.recommended, 150.0);
    assert_eq!(suggestion.reasoning, "Mid-range");
}

#[tokio::test]
async fn test_describe_item_returns_typed_description() {
    let (client, mock) = setup().await;
    mock.reply_with_text(
        "```json\n{\"title\":\"Yamaha F310\",\"description\":\"Acoustic guitar, warm tone\",\"category\":\"Musical Instruments\",\"condition\":\"Fair\",\"suggestedPrice\":{\"min\":100,\"max\":200,\"perDay\":150},\"tags\":[\"guitar\",\"acoustic\"]}\n```",
    );

    let description = client
        .describe_item("QUJDREVGRw==", "image/jpeg")
        .await
        .unwrap();

    assert_eq!(description.title, "Yamaha F310");
    assert_eq!(description.category, "Musical Instruments");
    assert_eq!(description.suggested_price.per_day, 150.0);
    assert_eq!(description.tags, vec!["guitar", "acoustic"]);
}

#[tokio::test]
async fn test_verify_image_returns_typed_verdict() {
    let (client, mock) = setup().await;
    mock.reply_with_text(
        "{\"isValid\":false,\"confidence\":35,\"detectedCategory\":\"Furniture\",\"issues\":[\"Image does not match the expected category\"]}",
    );

    let verdict = client
        .verify_image("QUJDREVGRw==", "image/png", "Electronics")
        .await
        .unwrap();

    assert!(!verdict.is_valid);
    assert_eq!(verdict.confidence, 35);
    assert_eq!(verdict.detected_category, "Furniture");
    assert_eq!(verdict.issues.len(), 1);
}

#[tokio::test]
async fn test_chatbot_turn_returns_reply() {
    let (client, mock) = setup().await;
    mock.reply_with_text("Head to the browse page and pick a category.");

    let turn = client
        .chatbot_turn(
            "How do I rent a camera?",
            &[
                ChatMessage::user("Hi there"),
                ChatMessage::assistant("Hey! How can I help?"),
            ],
        )
        .await
        .unwrap();

    assert_eq!(turn.message, "Head to the browse page and pick a category.");
    assert!(!turn.suggestions.is_empty());
}

#[tokio::test]
async fn test_recommendations_degrade_to_empty_list_under_quota_pressure() {
    let (client, mock) = setup().await;
    mock.fail_with(429, "Resource has been exhausted (e.g. check quota).");

    let result = client
        .recommend_complements("Sports", "Mountain Bike", None)
        .await
        .unwrap();

    assert!(result.items.is_empty());
    assert_eq!(
        result.reason,
        "Recommendations temporarily unavailable due to high demand."
    );
}

#[tokio::test]
async fn test_chatbot_degrades_to_apology_under_quota_pressure() {
    let (client, mock) = setup().await;
    mock.fail_with(429, "Resource has been exhausted (e.g. check quota).");

    let turn = client.chatbot_turn("Hello?", &[]).await.unwrap();

    assert!(turn.message.contains("try again in a few minutes"));
    assert_eq!(
        turn.suggestions,
        vec!["Try later".to_string(), "Contact Support".to_string()]
    );
}

#[tokio::test]
async fn test_core_actions_surface_quota_errors() {
    let (client, mock) = setup().await;
    mock.fail_with(429, "Resource has been exhausted (e.g. check quota).");

    let err = client
        .describe_item("QUJDREVGRw==", "image/jpeg")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AiErrorKind::QuotaExceeded);
    assert_eq!(err.to_string(), "AI service is busy. Please try again later.");
}

#[tokio::test]
async fn test_credential_failure_surfaces_manual_fallback_message() {
    let (client, mock) = setup().await;
    mock.fail_with(403, "API key not valid. Please pass a valid API key.");

    let err = client
        .suggest_price("Projector", "Electronics", "Good", Some(25000.0))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AiErrorKind::ApiKeyInvalid);
    let message = err.to_string();
    assert!(!message.contains("API key"));
    assert!(message.contains("fill in the details manually"));
}

#[tokio::test]
async fn test_unparseable_reply_surfaces_parse_error() {
    let (client, mock) = setup().await;
    mock.reply_with_text("I'd rather tell you a story about guitars.");

    let err = client
        .verify_image("QUJDREVGRw==", "image/png", "Electronics")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AiErrorKind::ParseError);
    match err {
        AiClientError::Service { .. } => {}
        other => panic!("expected a service error, got {:?}", other),
    }
}
