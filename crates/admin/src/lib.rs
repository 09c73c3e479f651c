//! Rentdesk Admin library.
//!
//! Server-rendered dashboard over the marketplace backend's admin REST API,
//! split out of the binary so the router can be tested and the API client
//! reused by the CLI.
//!
//! # Security
//!
//! This crate contains HIGH PRIVILEGE access:
//! - Backend admin API token (every booking, listing, user and setting)
//!
//! The dashboard has no login of its own. Only deploy it on a private network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use config::AdminConfig;
use middleware::{create_session_layer, request_id_middleware};
use state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "crates/admin/static";

/// Build the full application: routes, static files and the middleware stack.
pub fn app(state: AppState, config: &AdminConfig) -> Router {
    routes::routes()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(create_session_layer(config))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
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
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
