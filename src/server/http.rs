//! Router construction and the HTTP serve loop.

use std::future::Future;
use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{add_cors_headers, handle_health, handle_inference, handle_preflight, SharedState};
use crate::error::AppResult;

#[cfg(test)]
#[path = "http_tests.rs"]
mod http_tests;

/// Build the router.
///
/// `POST` and `OPTIONS` behave identically on every path; the path only shows
/// up in logs. `GET /health` is the one route with its own behavior. Request
/// bodies are not size-capped: late planner prompts carry every tool output.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/health",
            get(handle_health)
                .post(handle_inference)
                .options(handle_preflight),
        )
        .route("/", post(handle_inference).options(handle_preflight))
        .route("/*path", post(handle_inference).options(handle_preflight))
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::map_response(add_cors_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind a listener on `addr`.
pub async fn bind(addr: SocketAddr) -> AppResult<TcpListener> {
    Ok(TcpListener::bind(addr).await?)
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: SharedState) -> AppResult<()> {
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: SharedState,
    shutdown: F,
) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "Mock inference server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Mock inference server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
