// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Request Extraction Helpers
//!
//! JSON body extraction with validation. Handlers take the body as
//! `Result<Json<T>, JsonRejection>` so a malformed body becomes a structured
//! 422 instead of Axum's default rejection.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request-body validation hook, implemented by each request type.
pub trait Validate {
    /// Check semantic constraints the type system cannot express.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON body extraction and run the payload's validation.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Req {
        name: String,
    }

    impl Validate for Req {
        fn validate(&self) -> Result<(), String> {
            if self.name.is_empty() {
                return Err("name must not be empty".to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn valid_payload_passes() {
        let req = extract_validated_json(Ok(Json(Req {
            name: "Ana".to_string(),
        })))
        .unwrap();
        assert_eq!(req.name, "Ana");
    }

    #[test]
    fn failing_validation_becomes_validation_error() {
        let result = extract_validated_json(Ok(Json(Req {
            name: String::new(),
        })));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
