use super::*;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_check_length_counts_characters() {
    assert!(check_length(&"é".repeat(500), 500).is_ok());
    assert!(matches!(
        check_length(&"é".repeat(501), 500),
        Err(PublishError::TooLong {
            length: 501,
            max: 500
        })
    ));
}

#[test]
fn test_visibility_serializes_lowercase() {
    let req = StatusRequest {
        status: "hi",
        visibility: Some(Visibility::Unlisted),
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["visibility"], "unlisted");
}

#[tokio::test]
async fn test_mastodon_posts_status_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/statuses"))
        .and(header("authorization", "Bearer token-123"))
        .and(body_string_contains("status=1%2F2%0ASunny"))
        .and(body_string_contains("visibility=unlisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = MastodonClient::new(format!("{}/", server.uri()), "token-123", 500)
        .unwrap()
        .visibility(Some(Visibility::Unlisted));

    client.publish("1/2\nSunny").await.unwrap();
}

#[tokio::test]
async fn test_mastodon_refuses_long_text_without_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = MastodonClient::new(server.uri(), "token", 10).unwrap();
    let err = client.publish("this is far too long").await.unwrap_err();

    assert!(matches!(err, PublishError::TooLong { max: 10, .. }));
}

#[tokio::test]
async fn test_mastodon_reports_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/statuses"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&server)
        .await;

    let client = MastodonClient::new(server.uri(), "token", 500).unwrap();
    let err = client.publish("hello").await.unwrap_err();

    match err {
        PublishError::Server { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "Too many requests");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_console_publisher_enforces_limit() {
    let console = ConsolePublisher::new(5);

    assert_eq!(console.max_length(), 5);
    assert!(console.publish("ok").await.is_ok());
    assert!(matches!(
        console.publish("too long").await,
        Err(PublishError::TooLong { length: 8, max: 5 })
    ));
}
