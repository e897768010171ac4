// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Service Error Types
//!
//! The outcome taxonomy of the write path. Absence of a resource is never
//! represented here — services signal it as `Ok(None)`.

use thiserror::Error;

use cadastro_core::{Cep, CepError};
use cadastro_store::StoreError;

/// Failure of address resolution.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The postal code is malformed. Raised before any I/O.
    #[error("invalid CEP: {0}")]
    InvalidCep(#[from] CepError),

    /// The directory lookup was exhausted and failed: non-success status,
    /// unknown code, unusable payload, or timeout. Nothing was persisted.
    #[error("no address found for CEP {cep}: {reason}")]
    CepNotFound {
        /// The well-formed code that could not be resolved.
        cep: Cep,
        /// What the directory actually said, for diagnostics.
        reason: String,
    },

    /// The address store itself failed. Surfaced, not recovered.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure of a customer operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Address resolution failed; the customer write was aborted with
    /// nothing persisted.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The customer store itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
