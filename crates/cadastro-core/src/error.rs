// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Validation Errors
//!
//! Errors raised by validated constructors in this crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error constructing a [`crate::Cep`] from a raw string.
///
/// Raised locally, before any I/O is attempted — a malformed postal code
/// never reaches the address store or the ViaCEP directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CepError {
    /// The code does not contain exactly 8 digits.
    #[error("CEP {code:?} must contain exactly 8 digits")]
    WrongLength {
        /// The rejected input, as received.
        code: String,
    },

    /// The code contains characters other than ASCII digits.
    #[error("CEP {code:?} contains non-digit characters")]
    NonDigit {
        /// The rejected input, as received.
        code: String,
    },

    /// The code uses a hyphen but not in the `NNNNN-NNN` position.
    #[error("CEP {code:?} is not in NNNNNNNN or NNNNN-NNN form")]
    MisplacedHyphen {
        /// The rejected input, as received.
        code: String,
    },
}
