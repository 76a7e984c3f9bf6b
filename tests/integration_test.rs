use serde_json::json;
use speech_completion::{
    ClientConfig, CompletionClient, CompletionResult, Error, PromptTemplate, FALLBACK_TEXT,
};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(mock_server: &MockServer) -> CompletionClient {
    let config = ClientConfig::new("test-api-key").with_base_url(mock_server.uri());
    CompletionClient::new(config).expect("Failed to create completion client")
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "gen-123",
        "model": "mistralai/mistral-7b-instruct:free",
        "choices": [
            {
                "index": 0,
                "finish_reason": "stop",
                "message": { "role": "assistant", "content": content }
            }
        ]
    })
}

#[tokio::test]
async fn test_successful_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(header("content-type", "application/json"))
        .and(header("http-referer", "http://localhost:5173"))
        .and(header("x-title", "Vue Speech App"))
        .and(body_partial_json(json!({
            "model": "mistralai/mistral-7b-instruct:free"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("It's a search algorithm...")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let answer = client.get_completion("What is a binary search?").await;
    assert_eq!(answer, "It's a search algorithm...");
}

#[tokio::test]
async fn test_request_body_carries_templated_prompt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).with_template(PromptTemplate::PlainAnswer);
    client.get_completion("What is a deadlock?").await;

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(
        messages[0]["content"],
        PromptTemplate::PlainAnswer.apply("What is a deadlock?")
    );
}

#[tokio::test]
async fn test_empty_prompt_returns_empty_answer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.complete("", PromptTemplate::default()).await;
    assert_eq!(result, CompletionResult::Answer(String::new()));
}

#[tokio::test]
async fn test_provider_error_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit exceeded", "code": 429 }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_eq!(client.get_completion("Explain recursion").await, FALLBACK_TEXT);

    let err = client
        .try_complete("Explain recursion", PromptTemplate::default())
        .await
        .unwrap_err();
    match err {
        Error::Provider { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("Rate limit exceeded"));
        }
        other => panic!("Expected provider error, got {other}"),
    }
}

#[tokio::test]
async fn test_provider_error_body_is_truncated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(10_000)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .try_complete("Explain recursion", PromptTemplate::default())
        .await
        .unwrap_err();
    match err {
        Error::Provider { status, message } => {
            assert_eq!(status, 502);
            assert!(message.starts_with("API error: xxx"));
            assert!(message.len() < 1_000, "message was {} bytes", message.len());
        }
        other => panic!("Expected provider error, got {other}"),
    }
}

#[tokio::test]
async fn test_malformed_bodies_fall_back() {
    let bodies = [
        ResponseTemplate::new(200).set_body_string("not json at all"),
        ResponseTemplate::new(200).set_body_json(json!({ "id": "gen-1" })),
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [{ "message": {} }] })),
    ];

    for template in bodies {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(template)
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.complete("Explain recursion", PromptTemplate::default()).await;
        assert!(result.is_fallback());
        assert_eq!(result.text(), "Sorry, something went wrong.");
    }
}

#[tokio::test]
async fn test_network_failure_falls_back() {
    // Nothing listens on port 1.
    let config = ClientConfig::new("test-api-key").with_base_url("http://127.0.0.1:1");
    let client = CompletionClient::new(config).expect("Failed to create completion client");

    assert_eq!(client.get_completion("Explain recursion").await, FALLBACK_TEXT);

    let err = client
        .try_complete("Explain recursion", PromptTemplate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("too late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new("test-api-key")
        .with_base_url(mock_server.uri())
        .with_timeout(Duration::from_millis(100));
    let client = CompletionClient::new(config).unwrap();

    assert_eq!(client.get_completion("Explain recursion").await, FALLBACK_TEXT);
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unexpected")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::default().with_base_url(mock_server.uri());
    let client = CompletionClient::new(config).unwrap();

    assert_eq!(client.get_completion("Explain recursion").await, FALLBACK_TEXT);
}

#[tokio::test]
async fn test_blank_credential_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unexpected")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new("").with_base_url(mock_server.uri());
    let client = CompletionClient::new(config).unwrap();

    let err = client
        .try_complete("Explain recursion", PromptTemplate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingCredential));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("same answer")))
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = std::sync::Arc::new(client_for(&mock_server));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.get_completion(&format!("question {i}")).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), "same answer");
    }
}
