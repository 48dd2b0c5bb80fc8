use secrecy::Secret;
use serde_json::json;
use service_hub_backends::ReqwestHttpGateway;
use service_hub_core::{traits::HttpGateway, ErrorKind};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_post_json_returns_body() {
    let mock_server = MockServer::start().await;

    let payload = json!({ "body": "{\"text\":\"hola\",\"direction\":\"es-en\"}" });
    Mock::given(method("POST"))
        .and(path("/translationstage"))
        .and(header("content-type", "application/json"))
        .and(body_json(&payload))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"body": "{\"translation\": \"hello\"}"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = ReqwestHttpGateway::new(None).unwrap();
    let response = gateway
        .post_json(&format!("{}/translationstage", mock_server.uri()), &payload)
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.body, r#"{"body": "{\"translation\": \"hello\"}"}"#);
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let gateway = ReqwestHttpGateway::new(None).unwrap();
    let response = gateway
        .post_json(&mock_server.uri(), &json!({}))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_api_key_header_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-api-key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = ReqwestHttpGateway::new(Some(Secret::new("secret-key".to_string()))).unwrap();
    let response = gateway
        .post_json(&mock_server.uri(), &json!({}))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(!format!("{:?}", gateway).contains("secret-key"));
}

#[tokio::test]
async fn test_unreachable_host_is_invocation_error() {
    let gateway = ReqwestHttpGateway::new(None).unwrap();

    // Port 9 (discard) on localhost is closed in test environments.
    let err = gateway
        .post_json("http://127.0.0.1:9/translate", &json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Invocation);
}
