use mvtgen::MockGateway;
use serde_json::json;

use super::common;

#[tokio::test]
async fn e2e_validate_reports_syntax() {
    let server = common::spawn_server(MockGateway::with_reply("unused")).await;
    let url = server.url("/api/validate");

    let (status, body) = common::post_json(&url, &json!({ "json": "{\"a\":1}" })).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "valid": true }));

    let (status, body) = common::post_json(&url, &json!({ "json": "{\"a\":1,}" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["valid"], false);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    for empty in [json!({}), json!({ "json": null }), json!({ "json": "" })] {
        let (status, body) = common::post_json(&url, &empty).await;
        assert_eq!(status, 200, "{empty}");
        assert_eq!(body, json!({ "valid": false, "error": "No JSON provided" }));
    }

    assert_eq!(server.gateway.call_count(), 0);
    server.stop().await;
}
