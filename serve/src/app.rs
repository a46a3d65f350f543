//! Axum app: state, router and server configuration.
//!
//! Routes: `POST /api/generate`, `POST /api/validate`, `POST /api/explain`, `GET /` (landing
//! page) and `/static/*` (assets next to it).

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use mvtgen::ConfigurationService;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{explain, generate, index, validate};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Listen address and static asset location.
#[derive(Clone, Debug)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServeConfig {
    /// Builds config from environment variables, falling back to [`Default`] for unset or
    /// invalid values.
    ///
    /// - `HOST` (default 127.0.0.1)
    /// - `PORT` (default 5000)
    /// - `STATIC_DIR` (default `static`)
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            host: config::env_opt("HOST").unwrap_or(default.host),
            port: config::env_or("PORT", default.port),
            static_dir: config::env_opt("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.static_dir),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared state for all handlers.
pub struct AppState {
    pub(crate) service: ConfigurationService,
    pub(crate) static_dir: PathBuf,
}

impl AppState {
    pub fn new(service: ConfigurationService, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            static_dir: static_dir.into(),
        }
    }
}

/// Builds the router with permissive CORS and per-request trace spans.
pub fn router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/", get(index))
        .route("/api/generate", post(generate))
        .route("/api/validate", post(validate))
        .route("/api/explain", post(explain))
        .nest_service("/static", assets)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
