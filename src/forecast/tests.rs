use super::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new("sk-test").unwrap().base_url(server.uri())
}

#[test]
fn test_request_serialization_skips_missing_temperature() {
    let req = ChatCompletionRequest {
        model: DEFAULT_MODEL.to_string(),
        messages: vec![ChatMessage::user("Forecast please")],
        max_tokens: 200,
        temperature: None,
    };

    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["messages"][0]["role"], "user");
    assert_eq!(value["max_tokens"], 200);
    assert!(value.get("temperature").is_none());
}

#[test]
fn test_first_content_of_empty_response() {
    let res: ChatCompletionResponse = serde_json::from_value(json!({})).unwrap();
    assert!(res.first_content().is_none());
}

#[tokio::test]
async fn test_generate_returns_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 300,
            "temperature": 0.5,
            "messages": [{"role": "user", "content": "Weather in Atlantis?"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Damp, as usual."}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await.temperature(0.5);
    let forecast = client.generate("Weather in Atlantis?", 300).await.unwrap();

    assert_eq!(forecast, "Damp, as usual.");
}

#[tokio::test]
async fn test_generate_reports_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.generate("Weather?", 100).await.unwrap_err();

    match err {
        GenerationError::Server { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_generate_rejects_blank_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "   "}}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.generate("Weather?", 100).await.unwrap_err();

    assert!(matches!(err, GenerationError::EmptyCompletion));
}

#[tokio::test]
async fn test_generate_transport_failure() {
    // Nothing listens on port 9 locally
    let client = OpenAiClient::new("sk-test")
        .unwrap()
        .base_url("http://127.0.0.1:9");

    let err = client.generate("Weather?", 100).await.unwrap_err();
    assert!(matches!(err, GenerationError::Request(_)));
}
