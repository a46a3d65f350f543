//! Route handlers. Each one is a direct call into [`ConfigurationService`](mvtgen::ConfigurationService)
//! plus response shaping.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use mvtgen::{
    ExplainRequest, ExplainResponse, GenerateRequest, GenerateResponse, ValidateRequest,
    ValidationResult,
};

use super::app::AppState;
use super::response::ApiError;

/// `POST /api/generate`: 200 `{success, json}`, 400 when description is missing, 500 for
/// malformed model output or gateway failure.
pub(crate) async fn generate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(req) = body?;
    let json = state
        .service
        .generate_or_update(&req.description, req.existing_json.as_deref())
        .await?;
    Ok(Json(GenerateResponse::new(json)))
}

/// `POST /api/validate`: always 200 with `{valid, error?}` for a well-formed request body.
pub(crate) async fn validate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
    let Json(req) = body?;
    Ok(Json(state.service.validate_only(&req.json)))
}

/// `POST /api/explain`: 200 `{success, explanation}`, 400 when json is missing, 500 on
/// gateway failure.
pub(crate) async fn explain(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let Json(req) = body?;
    let explanation = state.service.explain(&req.json).await?;
    Ok(Json(ExplainResponse::new(explanation)))
}

/// `GET /`: landing page from `<static_dir>/index.html`.
pub(crate) async fn index(State(state): State<Arc<AppState>>) -> Response {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "landing page unavailable");
            (StatusCode::NOT_FOUND, "index.html not found").into_response()
        }
    }
}
