use std::path::{Path, PathBuf};

use mvtgen::MockGateway;

use super::common;

/// The `static/` directory shipped at the workspace root.
fn bundled_static_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("static")
}

#[tokio::test]
async fn e2e_landing_page_and_assets() {
    let server =
        common::spawn_server_with(MockGateway::with_reply("unused"), &bundled_static_dir()).await;

    let resp = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("MVT JSON Generator"));
    for id in ["description", "existingJson", "generateBtn", "explainBtn", "output"] {
        assert!(html.contains(&format!("id=\"{id}\"")), "missing #{id}");
    }
    assert!(html.contains("/static/app.js"));

    let resp = reqwest::get(server.url("/static/app.js")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let js = resp.text().await.unwrap();
    for call in ["'/generate'", "'/explain'", "'/validate'", "existingJson: existingJson || null"] {
        assert!(js.contains(call), "app.js lacks {call}");
    }
    server.stop().await;
}

#[tokio::test]
async fn e2e_custom_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>custom</h1>").unwrap();
    let server = common::spawn_server_with(MockGateway::with_reply("unused"), dir.path()).await;

    let resp = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.text().await.unwrap(), "<h1>custom</h1>");

    let resp = reqwest::get(server.url("/static/missing.js")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    server.stop().await;
}

#[tokio::test]
async fn e2e_missing_landing_page_is_404() {
    let server = common::spawn_server(MockGateway::with_reply("unused")).await;
    let resp = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    server.stop().await;
}
