use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tracing::warn;

use crate::server::api::{self, ApiError};
use crate::server::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/estimate", post(estimate))
        .route("/api/chart", post(chart))
        .route("/api/recommendations", post(recommendations))
        .fallback(not_found)
        .with_state(state)
}

async fn health() -> Response {
    respond(api::health_payload().map_err(ApiError::Serialize))
}

async fn estimate(State(state): State<AppState>, body: String) -> Response {
    respond(api::estimate_payload(&state, &body).await)
}

async fn chart(body: String) -> Response {
    respond(api::chart_payload(&body))
}

async fn recommendations(body: String) -> Response {
    respond(api::recommendations_payload(&body))
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

fn respond(result: Result<String, ApiError>) -> Response {
    match result {
        Ok(payload) => json_response(StatusCode::OK, payload),
        Err(err) => err.into_response(),
    }
}

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::to_string_pretty(&serde_json::json!({
        "status": "error",
        "message": message
    }))
    .unwrap_or_else(|_| "{\n  \"status\": \"error\"\n}".to_string());
    json_response(status, body)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warn!(status = status.as_u16(), error = %self, "request failed");
        match self {
            ApiError::Validation(validation) => match serde_json::to_string_pretty(&validation) {
                Ok(body) => json_response(status, body),
                Err(_) => error_response(status, "Validation failed"),
            },
            other => error_response(status, &other.to_string()),
        }
    }
}
