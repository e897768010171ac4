// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Application State
//!
//! Shared state for the Axum application. The domain services are
//! constructed once by the composing entry point and injected here by
//! `Arc` — the API layer owns no business logic and no lifecycles.

use std::sync::Arc;

use cadastro_service::CustomerService;

/// Environment-driven server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind (`CADASTRO_PORT`, default 8080).
    pub port: u16,
    /// Whether the metrics middleware and `/metrics` endpoint are mounted
    /// (`CADASTRO_METRICS_ENABLED`, default true).
    pub metrics_enabled: bool,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("CADASTRO_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let metrics_enabled = std::env::var("CADASTRO_METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        Self {
            port,
            metrics_enabled,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            metrics_enabled: true,
        }
    }
}

/// Shared application state passed to all route handlers.
///
/// Cheaply cloneable — the service is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub customers: Arc<dyn CustomerService>,
}

impl AppState {
    /// State with default configuration.
    pub fn new(customers: Arc<dyn CustomerService>) -> Self {
        Self::with_config(AppConfig::default(), customers)
    }

    /// State with explicit configuration.
    pub fn with_config(config: AppConfig, customers: Arc<dyn CustomerService>) -> Self {
        Self { config, customers }
    }
}
