// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Store Errors

use thiserror::Error;

/// Failure of a persistence backend.
///
/// Not recovered locally: a store error aborts the surrounding operation and
/// surfaces to the caller as fatal for that request.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing database rejected or failed the operation.
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}
