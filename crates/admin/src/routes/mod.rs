//! HTTP route handlers for the block service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Health check
//!
//! # Order stock block
//! GET  /orders/{id}/block              - Stock for an order's line items
//! POST /orders/{id}/block/process      - Tag the order and deduct its stock
//!
//! # UI extension
//! POST /api/log                        - Log a client-side error report
//! ```
//!
//! `{id}` is a full order GID or its numeric ID.

pub mod block;
pub mod log;

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Build the route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(block::router())
        .merge(log::router())
}

/// Build the complete application with request tracing.
///
/// Sentry layers are added by the binary so tests can run without a client.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not call Shopify.
async fn health() -> &'static str {
    "ok"
}
