use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info};

use super::SharedState;
use crate::error::SimulationError;
use crate::inference::ErrorResponse;
use crate::simulation::ClassifiedRequest;

/// Value of `Access-Control-Allow-Origin` on every response.
pub const CORS_ALLOW_ORIGIN: &str = "*";
/// Value of `Access-Control-Allow-Methods` on every response.
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";
/// Value of `Access-Control-Allow-Headers` on every response.
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_sessions: usize,
}

/// Answer an inference call on any path.
///
/// The body is buffered in full and decoded lossily so that no input is ever
/// rejected before classification.
pub async fn handle_inference(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let text = String::from_utf8_lossy(&body);
    let request = ClassifiedRequest::from_body(&text);

    info!(
        method = %method,
        path = %uri.path(),
        body_bytes = body.len(),
        "Inference request received"
    );

    match state.synthesizer.synthesize(&request).await {
        Ok(synthesized) => {
            tokio::time::sleep(synthesized.delay).await;
            info!(
                path = %uri.path(),
                simulated = %synthesized.path,
                delay_ms = synthesized.delay.as_millis() as u64,
                latency_ms = start.elapsed().as_millis() as u64,
                "Inference response sent"
            );
            (StatusCode::OK, Json(synthesized.payload)).into_response()
        }
        Err(e) => {
            error!(path = %uri.path(), "Failed to synthesize inference response");
            e.into_response()
        }
    }
}

impl IntoResponse for SimulationError {
    fn into_response(self) -> Response {
        error!(error = %self, "Responding with 400");
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::invalid_request())).into_response()
    }
}

/// CORS preflight: empty 200, headers added by [`add_cors_headers`].
pub async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe for the harness that launches the server.
pub async fn handle_health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        active_sessions: state.sessions.len().await,
    })
}

/// Stamp the permissive CORS headers onto a response.
pub async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(CORS_ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    response
}
