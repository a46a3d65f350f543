//! HTTP server for mvtgen (axum).
//!
//! Listens on http://127.0.0.1:5000 by default and exposes `/api/generate`, `/api/validate`,
//! `/api/explain` plus the static landing page.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`router`], [`AppState`],
//! [`ServeConfig`].

mod app;
mod handlers;
mod response;

use std::future::Future;
use std::sync::Arc;

use mvtgen::ConfigurationService;
use tokio::net::TcpListener;
use tracing::info;

pub use app::{router, AppState, ServeConfig, DEFAULT_PORT};

/// Serves on an existing listener until `shutdown` resolves. Tests bind `127.0.0.1:0` and
/// pass the listener in.
pub async fn run_serve_on_listener<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("HTTP server listening on http://{}", addr);
    let app = router(Arc::new(state));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

/// Binds `config.addr()` and serves until Ctrl-C.
pub async fn run_serve(
    config: &ServeConfig,
    service: ConfigurationService,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(config.addr()).await?;
    let state = AppState::new(service, config.static_dir.clone());
    run_serve_on_listener(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("ctrl-c handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
