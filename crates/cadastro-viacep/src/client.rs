// SPDX-License-Identifier: AGPL-3.0-or-later
//! # ViaCEP HTTP Client
//!
//! Wraps a `reqwest::Client` with the directory base URL, per-request
//! timeout, and request/response mapping. `Send + Sync`, designed to be
//! shared via `Arc` across async tasks.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use cadastro_core::{Address, Cep};

use crate::error::LookupError;
use crate::retry::retry_send;
use crate::CepLookup;

/// Default ViaCEP endpoint.
const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the ViaCEP HTTP client.
#[derive(Debug, Clone)]
pub struct ViaCepConfig {
    /// Base URL of the directory (e.g., `https://viacep.com.br/ws`).
    pub base_url: String,
    /// Request timeout in seconds (default: 10).
    pub timeout_secs: u64,
}

impl ViaCepConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Configuration from `VIACEP_BASE_URL` / `VIACEP_TIMEOUT_SECS`,
    /// falling back to the public directory and the default timeout.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("VIACEP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = std::env::var("VIACEP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            timeout_secs,
        }
    }
}

impl Default for ViaCepConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HTTP client for the ViaCEP postal-code directory.
#[derive(Debug)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl ViaCepClient {
    /// Build a client from configuration.
    pub fn new(config: ViaCepConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::ClientBuild(e.to_string()))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            timeout_ms: config.timeout_secs * 1000,
        })
    }
}

/// Wire shape of a ViaCEP response.
///
/// Unknown codes come back as HTTP 200 with `{"erro": true}` and no address
/// fields; known codes may still omit `logradouro`/`bairro` for city-wide
/// CEPs, so only `localidade` and `uf` are required.
#[derive(Debug, Deserialize)]
struct ViaCepPayload {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    bairro: Option<String>,
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    uf: Option<String>,
}

impl ViaCepPayload {
    fn into_address(self, cep: &Cep, endpoint: &str) -> Result<Address, LookupError> {
        let require = |field: Option<String>, name: &str| {
            field.filter(|v| !v.is_empty()).ok_or_else(|| {
                LookupError::MalformedPayload {
                    endpoint: endpoint.to_string(),
                    detail: format!("missing required field {name:?}"),
                }
            })
        };

        Ok(Address {
            cep: cep.clone(),
            street: self.logradouro.unwrap_or_default(),
            neighborhood: self.bairro.unwrap_or_default(),
            city: require(self.localidade, "localidade")?,
            state: require(self.uf, "uf")?,
        })
    }
}

#[async_trait]
impl CepLookup for ViaCepClient {
    async fn fetch(&self, cep: &Cep) -> Result<Address, LookupError> {
        let endpoint = format!("{}/{}/json/", self.base_url, cep.as_str());

        let response = retry_send(|| self.client.get(&endpoint).send())
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LookupError::Timeout {
                        elapsed_ms: self.timeout_ms,
                    }
                } else {
                    LookupError::Http {
                        endpoint: endpoint.clone(),
                        source: e,
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                endpoint,
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let payload: ViaCepPayload =
            response
                .json()
                .await
                .map_err(|e| LookupError::MalformedPayload {
                    endpoint: endpoint.clone(),
                    detail: e.to_string(),
                })?;

        if payload.erro {
            tracing::debug!(%cep, "ViaCEP has no entry for code");
            return Err(LookupError::CepNotFound { cep: cep.clone() });
        }

        payload.into_address(cep, &endpoint)
    }
}
