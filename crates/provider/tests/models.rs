//! Tests for model discovery.

use studybuddy_provider::{ProviderError, ProviderKind, list_models, models::ANTHROPIC_MODELS};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn anthropic_is_a_fixed_list() {
    let client = llm::Client::new();
    let models = list_models(&client, ProviderKind::Anthropic, "http://127.0.0.1:1", None)
        .await
        .unwrap();
    assert_eq!(models, ANTHROPIC_MODELS);
}

#[tokio::test]
async fn ollama_reads_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{ "name": "llama3:8b", "size": 1 }, { "name": "mistral:latest" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let models = list_models(&llm::Client::new(), ProviderKind::Ollama, &server.uri(), None)
        .await
        .unwrap();
    assert_eq!(models, vec!["llama3:8b", "mistral:latest"]);
}

#[tokio::test]
async fn openai_compatible_reads_data_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("authorization", "Bearer tk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "list",
            "data": [{ "id": "gpt-4o", "object": "model" }, { "id": "gpt-4o-mini" }]
        })))
        .mount(&server)
        .await;

    let models = list_models(&llm::Client::new(), ProviderKind::OpenAI, &server.uri(), Some("tk"))
        .await
        .unwrap();
    assert_eq!(models, vec!["gpt-4o", "gpt-4o-mini"]);
}

#[tokio::test]
async fn together_accepts_a_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "meta-llama/Llama-3-8b-chat-hf", "type": "chat" }
        ])))
        .mount(&server)
        .await;

    let models = list_models(&llm::Client::new(), ProviderKind::Together, &server.uri(), Some("tk"))
        .await
        .unwrap();
    assert_eq!(models, vec!["meta-llama/Llama-3-8b-chat-hf"]);
}

#[tokio::test]
async fn google_strips_models_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(header("x-goog-api-key", "g"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{ "name": "models/gemini-1.5-flash" }, { "name": "models/gemini-1.5-pro" }]
        })))
        .mount(&server)
        .await;

    let models = list_models(&llm::Client::new(), ProviderKind::Google, &server.uri(), Some("g"))
        .await
        .unwrap();
    assert_eq!(models, vec!["gemini-1.5-flash", "gemini-1.5-pro"]);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .expect(1)
        .mount(&server)
        .await;

    let err = list_models(&llm::Client::new(), ProviderKind::Groq, &server.uri(), Some("bad"))
        .await
        .unwrap_err();
    match err {
        ProviderError::Status { kind, status, body } => {
            assert_eq!(kind, ProviderKind::Groq);
            assert_eq!(status, 401);
            assert_eq!(body, "invalid key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn keyed_kind_without_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = list_models(&llm::Client::new(), ProviderKind::OpenAI, &server.uri(), Some(""))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::MissingCredential(ProviderKind::OpenAI)));
}

#[tokio::test]
async fn malformed_listing_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = list_models(&llm::Client::new(), ProviderKind::Ollama, &server.uri(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Decode { .. }));
}
