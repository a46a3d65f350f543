//! Shared helpers for e2e tests. Received bodies are logged with `[e2e] received: ...`;
//! run with `--nocapture` to see them.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use mvtgen::{ConfigurationService, MockGateway};
use serve::AppState;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Running server; dropping it stops the server.
pub struct TestServer {
    pub base_url: String,
    pub gateway: Arc<MockGateway>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Stops the server and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Binds a random port and serves with `gateway`; static files come from `static_dir`.
pub async fn spawn_server_with(gateway: MockGateway, static_dir: &Path) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let gateway = Arc::new(gateway);
    let state = AppState::new(ConfigurationService::new(gateway.clone()), static_dir);
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve::run_serve_on_listener(listener, state, async move {
        let _ = rx.await;
    }));
    TestServer {
        base_url: format!("http://{}", addr),
        gateway,
        shutdown: Some(tx),
        handle: Some(handle),
    }
}

pub async fn spawn_server(gateway: MockGateway) -> TestServer {
    spawn_server_with(gateway, Path::new("does-not-exist")).await
}

/// POSTs `body` as JSON and returns (status, parsed body).
pub async fn post_json(url: &str, body: &serde_json::Value) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(url)
        .json(body)
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap();
    eprintln!("[e2e] received: {} {}", status, text);
    let value = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
    (status, value)
}
