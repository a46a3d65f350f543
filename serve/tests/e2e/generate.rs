use mvtgen::MockGateway;
use serde_json::{json, Value};

use super::common;

const US_TEST_REPLY: &str = "```json\n{\"experiment\":{\"name\":\"homepage_cta\",\"variants\":[{\"id\":\"control\",\"weight\":50},{\"id\":\"treatment\",\"weight\":50}],\"targeting\":{\"geo\":{\"countries\":[\"US\"]}}}}\n```";

#[tokio::test]
async fn e2e_generate_returns_canonical_json() {
    let server = common::spawn_server(MockGateway::with_reply(US_TEST_REPLY)).await;

    let (status, body) = common::post_json(
        &server.url("/api/generate"),
        &json!({ "description": "Create a test with 2 variants, 50/50 split, targeting US users" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let text = body["json"].as_str().unwrap();
    let config: Value = serde_json::from_str(text).unwrap();
    assert_ne!(config, json!({}));
    assert_eq!(config["experiment"]["variants"].as_array().map(Vec::len), Some(2));
    assert_eq!(config["experiment"]["targeting"]["geo"]["countries"][0], "US");
    assert!(text.starts_with("{\n  \"experiment\""), "{text}");
    server.stop().await;
}

#[tokio::test]
async fn e2e_update_preserves_existing_keys() {
    let server = common::spawn_server(MockGateway::with_reply(
        r#"{"experiment":"A","variants":{"control":{"allocation":50}}}"#,
    ))
    .await;

    let (status, body) = common::post_json(
        &server.url("/api/generate"),
        &json!({ "description": "add a control variant", "existingJson": "{\"experiment\":\"A\"}" }),
    )
    .await;

    assert_eq!(status, 200);
    let config: Value = serde_json::from_str(body["json"].as_str().unwrap()).unwrap();
    assert_eq!(config["experiment"], "A");
    assert!(config["variants"]["control"].is_object());
    let sent = &server.gateway.requests()[0].user_message;
    assert!(sent.contains("{\"experiment\":\"A\"}"), "{sent}");
    server.stop().await;
}

#[tokio::test]
async fn e2e_null_existing_json_generates_from_scratch() {
    let server = common::spawn_server(MockGateway::with_reply(r#"{"experiment":"B"}"#)).await;

    let (status, body) = common::post_json(
        &server.url("/api/generate"),
        &json!({ "description": "button color test", "existingJson": null }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(server.gateway.requests()[0].user_message, "button color test");
    server.stop().await;
}

#[tokio::test]
async fn e2e_generate_missing_description_is_400() {
    let server = common::spawn_server(MockGateway::with_reply("{}")).await;

    for body in [
        json!({}),
        json!({ "description": "" }),
        json!({ "description": null }),
        json!({ "description": null, "existingJson": null }),
        json!({ "existingJson": "{}" }),
    ] {
        let (status, resp) = common::post_json(&server.url("/api/generate"), &body).await;
        assert_eq!(status, 400);
        assert_eq!(resp["error"], "Description is required");
    }
    assert_eq!(server.gateway.call_count(), 0);
    server.stop().await;
}

#[tokio::test]
async fn e2e_generate_malformed_model_output_is_500() {
    let server = common::spawn_server(MockGateway::with_reply("{\"a\": 1,}")).await;

    let (status, body) = common::post_json(
        &server.url("/api/generate"),
        &json!({ "description": "anything" }),
    )
    .await;

    assert_eq!(status, 500);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid JSON generated: "), "{error}");
    assert!(error.contains("trailing comma"), "{error}");
    server.stop().await;
}

#[tokio::test]
async fn e2e_generate_gateway_error_is_500_with_remote_message() {
    let server = common::spawn_server(MockGateway::failing(
        400,
        "The provided model identifier is invalid.",
    ))
    .await;

    let (status, body) = common::post_json(
        &server.url("/api/generate"),
        &json!({ "description": "anything" }),
    )
    .await;

    assert_eq!(status, 500);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("The provided model identifier is invalid."));
    server.stop().await;
}

#[tokio::test]
async fn e2e_unparseable_request_body_is_400() {
    let server = common::spawn_server(MockGateway::with_reply("{}")).await;

    let resp = reqwest::Client::new()
        .post(server.url("/api/generate"))
        .header("content-type", "application/json")
        .body("not valid json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    server.stop().await;
}
