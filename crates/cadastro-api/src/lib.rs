// SPDX-License-Identifier: AGPL-3.0-or-later
//! # cadastro-api — Axum API Service for the Cadastro Stack
//!
//! The transport layer over the domain services. Thin by design: handlers
//! map payloads and outcomes, and everything with decision logic lives in
//! cadastro-service.
//!
//! ## API Surface
//!
//! | Prefix               | Module                 | Notes                        |
//! |----------------------|------------------------|------------------------------|
//! | `/v1/customers/*`    | [`routes::customers`]  | Customer CRUD                |
//! | `/health/*`          | `lib.rs`               | Liveness/readiness probes    |
//! | `/metrics`           | `lib.rs`               | Prometheus text exposition   |
//! | `/openapi.json`      | [`openapi`]            | Generated OpenAPI spec       |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! Health probes and `/metrics` are mounted outside the metrics middleware
//! so scrapes and probes do not count themselves.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = state.config.metrics_enabled;

    // API routes. Body size limit: 1 MiB — customer payloads are small, and
    // the limit stops oversized bodies before deserialization.
    let mut api = Router::new()
        .merge(routes::customers::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(1024 * 1024));

    // Only register the metrics middleware when metrics are enabled.
    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Operational endpoints — mounted outside the metrics middleware.
    let mut ops = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        ops = ops
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(metrics));
    }

    Router::new().merge(ops).merge(api)
}

/// GET /health/liveness — process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// GET /health/readiness — ready to serve traffic.
async fn readiness() -> &'static str {
    "ready"
}

/// GET /metrics — Prometheus metrics scrape endpoint.
async fn prometheus_metrics(
    Extension(metrics): Extension<ApiMetrics>,
) -> axum::response::Response {
    match metrics.gather_and_encode() {
        Ok(text) => text.into_response(),
        Err(detail) => AppError::Internal(detail).into_response(),
    }
}
