//! Integration tests for the generation client against a mock backend.

use serde_json::json;
use usra::conversation::{ChatMode, Conversation};
use usra::i18n::{strings, Language};
use usra::{GenerationClient, GenerationError, Generator};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GenerationClient {
    GenerationClient::new(
        server.uri(),
        "sk-test".to_string(),
        "test-model".to_string(),
        "test-image-model".to_string(),
    )
}

#[tokio::test]
async fn chat_reply_is_extracted_from_the_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "ahlan!"}}]
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .generate_reply("hello", Vec::new())
        .await
        .unwrap();
    assert_eq!(reply, "ahlan!");
}

#[tokio::test]
async fn chat_request_carries_the_configured_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "test-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .generate_reply("hello", Vec::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn backend_error_status_becomes_a_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_reply("hello", Vec::new())
        .await
        .unwrap_err();
    match err {
        GenerationError::Api { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("quota"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_choices_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_reply("hello", Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Malformed(_)));
}

#[tokio::test]
async fn image_url_is_extracted_from_the_data_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://img.test/wolf.png"}]
        })))
        .mount(&server)
        .await;

    let url = client_for(&server).generate_image("a wolf").await.unwrap();
    assert_eq!(url, "https://img.test/wolf.png");
}

#[tokio::test]
async fn inline_image_data_falls_back_to_a_data_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"b64_json": "aGk="}]
        })))
        .mount(&server)
        .await;

    let url = client_for(&server).generate_image("a wolf").await.unwrap();
    assert_eq!(url, "data:image/png;base64,aGk=");
}

/// End to end: a failing backend grows the transcript by exactly two
/// turns (the user turn and the absorbed error turn) and clears the
/// loading flag.
#[tokio::test]
async fn conversation_absorbs_a_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut conversation = Conversation::new();
    let table = strings(Language::En);

    assert!(conversation.submit("hello", &client));
    assert!(conversation.is_loading());

    let mut resolved = false;
    for _ in 0..400 {
        if conversation.poll(table).is_some() {
            resolved = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert!(resolved, "outcome never arrived");
    assert_eq!(conversation.turns.len(), 2);
    assert_eq!(conversation.turns[1].text, table.generation_failed);
    assert!(!conversation.is_loading());
}

#[tokio::test]
async fn image_mode_round_trip_through_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://img.test/art.png"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut conversation = Conversation::new();
    conversation.mode = ChatMode::Image;
    let table = strings(Language::Ar);

    conversation.submit("لوحة جميلة", &client);
    let mut resolved = false;
    for _ in 0..400 {
        if conversation.poll(table).is_some() {
            resolved = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert!(resolved, "outcome never arrived");

    let turn = conversation.turns.last().unwrap();
    assert_eq!(turn.image_url.as_deref(), Some("https://img.test/art.png"));
    assert_eq!(turn.text, table.image_ready);
}
