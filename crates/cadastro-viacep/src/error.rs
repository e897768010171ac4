// SPDX-License-Identifier: AGPL-3.0-or-later
//! ViaCEP client error types.

use cadastro_core::Cep;

/// Errors from ViaCEP directory calls.
///
/// Every variant is a lookup *failure* to the resolver — none of them yields
/// a usable address, and the resolver persists nothing when it sees one.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// HTTP transport error (connection refused, DNS, protocol).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded the client-enforced timeout.
    #[error("ViaCEP request timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// ViaCEP returned a non-2xx status.
    #[error("ViaCEP {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// ViaCEP answered 200 with its `{"erro": true}` marker: the code is
    /// well-formed but not registered in the directory.
    #[error("no address registered for CEP {cep}")]
    CepNotFound { cep: Cep },

    /// The response body could not be parsed, or a 200 body was missing
    /// required address fields.
    #[error("malformed ViaCEP response from {endpoint}: {detail}")]
    MalformedPayload { endpoint: String, detail: String },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}
