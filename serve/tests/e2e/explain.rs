use mvtgen::MockGateway;
use serde_json::json;

use super::common;

#[tokio::test]
async fn e2e_explain_returns_model_prose() {
    let prose = "This test compares two homepage call-to-action buttons for US visitors.";
    let server = common::spawn_server(MockGateway::with_reply(prose)).await;

    let (status, body) = common::post_json(
        &server.url("/api/explain"),
        &json!({ "json": "{\"experiment\":\"homepage_cta\"}" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true, "explanation": prose }));
    let req = &server.gateway.requests()[0];
    assert!(req.system.is_none());
    assert!(req.user_message.contains("homepage_cta"));
    server.stop().await;
}

#[tokio::test]
async fn e2e_explain_missing_json_is_400() {
    let server = common::spawn_server(MockGateway::with_reply("unused")).await;

    for empty in [json!({ "json": "" }), json!({ "json": null }), json!({})] {
        let (status, body) = common::post_json(&server.url("/api/explain"), &empty).await;
        assert_eq!(status, 400, "{empty}");
        assert_eq!(body["error"], "JSON is required");
    }
    assert_eq!(server.gateway.call_count(), 0);
    server.stop().await;
}

#[tokio::test]
async fn e2e_explain_gateway_error_is_500() {
    let server = common::spawn_server(MockGateway::failing(503, "Service Unavailable")).await;

    let (status, body) = common::post_json(&server.url("/api/explain"), &json!({ "json": "{}" })).await;
    assert_eq!(status, 500);
    assert!(body["error"].as_str().unwrap().ends_with("Service Unavailable"));
    server.stop().await;
}
