//! Metrics and health probe HTTP endpoints.

use crate::error::ControllerError;
use crate::metrics::ControllerMetrics;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// `GET /metrics` in the Prometheus text format
pub fn metrics_routes(metrics: Arc<ControllerMetrics>) -> Router {
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(metrics)
}

/// `GET /healthz` and `GET /readyz`
pub fn health_routes() -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/readyz", get(|| async { "ok" }))
}

async fn render_metrics(State(metrics): State<Arc<ControllerMetrics>>) -> Response {
    match metrics.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Bind `addr` and serve `router` until the listener fails.
pub async fn serve(addr: SocketAddr, router: Router, name: &'static str) -> Result<(), ControllerError> {
    let listener = TcpListener::bind(addr).await?;
    info!("{} endpoint listening on {}", name, addr);
    axum::serve(listener, router).await?;
    Ok(())
}
