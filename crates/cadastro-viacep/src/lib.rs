// SPDX-License-Identifier: AGPL-3.0-or-later
//! # cadastro-viacep — ViaCEP Directory Client
//!
//! Typed HTTP client for the [ViaCEP](https://viacep.com.br) postal-code
//! directory, behind the [`CepLookup`] trait so the resolver can be driven
//! by a test double without touching the network.
//!
//! ## Error Handling
//!
//! HTTP errors are mapped to [`LookupError`] with diagnostic context
//! including the endpoint URL, HTTP status, and response body excerpt.
//! ViaCEP answers an unknown code with HTTP 200 and an `{"erro": true}`
//! body — that, and any 200 body missing required fields, is classified as
//! a lookup failure, never as a usable address.
//!
//! ## Timeout & Retry
//!
//! Each request carries a client-enforced timeout (configurable, default
//! 10s) so a slow directory becomes a failure, never a hang. Transport-level
//! connection failures retry with exponential backoff (see [`retry`]);
//! HTTP error statuses and body failures never retry.

pub mod client;
pub mod error;
pub mod retry;

use async_trait::async_trait;

use cadastro_core::{Address, Cep};

pub use client::{ViaCepClient, ViaCepConfig};
pub use error::LookupError;

/// External postal-code lookup capability.
///
/// One real implementation ([`ViaCepClient`]); tests substitute their own.
#[async_trait]
pub trait CepLookup: Send + Sync {
    /// Resolve a postal code to a full address via the external directory.
    async fn fetch(&self, cep: &Cep) -> Result<Address, LookupError>;
}
