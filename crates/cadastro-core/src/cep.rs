// SPDX-License-Identifier: AGPL-3.0-or-later
//! # CEP — Validated Postal Code Newtype
//!
//! The Brazilian postal code (CEP) is the sole identity key for an address.
//! This module enforces the format at construction time: a [`Cep`] either
//! holds exactly 8 ASCII digits or it does not exist.
//!
//! ## Canonical Forms
//!
//! Construction accepts the bare form (`"01310100"`) and the hyphenated form
//! (`"01310-100"`). The value is stored normalized (8 digits, no hyphen);
//! `Display` and serde serialization render the hyphenated form.

use serde::{Deserialize, Serialize};

use crate::error::CepError;

/// A validated Brazilian postal code, stored as 8 normalized digits.
///
/// Serializes as the hyphenated form (`"01310-100"`); deserialization
/// accepts both forms and rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cep(String);

impl Cep {
    /// Parse a raw postal code, accepting `NNNNNNNN` or `NNNNN-NNN`.
    ///
    /// Leading and trailing whitespace is tolerated; everything else about
    /// the format is strict.
    pub fn parse(raw: &str) -> Result<Self, CepError> {
        let trimmed = raw.trim();

        let normalized = match trimmed.split_once('-') {
            Some((prefix, suffix)) => {
                if prefix.len() != 5 || suffix.len() != 3 || suffix.contains('-') {
                    return Err(CepError::MisplacedHyphen {
                        code: trimmed.to_string(),
                    });
                }
                format!("{prefix}{suffix}")
            }
            None => trimmed.to_string(),
        };

        if normalized.len() != 8 {
            return Err(CepError::WrongLength {
                code: trimmed.to_string(),
            });
        }
        if !normalized.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CepError::NonDigit {
                code: trimmed.to_string(),
            });
        }

        Ok(Self(normalized))
    }

    /// The normalized 8-digit form, used as the store key and in ViaCEP
    /// request paths.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hyphenated `NNNNN-NNN` form.
    pub fn hyphenated(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl std::fmt::Display for Cep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hyphenated())
    }
}

impl TryFrom<String> for Cep {
    type Error = CepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cep> for String {
    fn from(cep: Cep) -> Self {
        cep.hyphenated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_form() {
        let cep = Cep::parse("01310100").unwrap();
        assert_eq!(cep.as_str(), "01310100");
    }

    #[test]
    fn test_parse_hyphenated_form() {
        let cep = Cep::parse("01310-100").unwrap();
        assert_eq!(cep.as_str(), "01310100");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let cep = Cep::parse("  01310-100 ").unwrap();
        assert_eq!(cep.as_str(), "01310100");
    }

    #[test]
    fn test_both_forms_compare_equal() {
        assert_eq!(Cep::parse("01310100").unwrap(), Cep::parse("01310-100").unwrap());
    }

    #[test]
    fn test_display_is_hyphenated() {
        let cep = Cep::parse("01310100").unwrap();
        assert_eq!(cep.to_string(), "01310-100");
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(matches!(
            Cep::parse("0131010"),
            Err(CepError::WrongLength { .. })
        ));
    }

    #[test]
    fn test_too_long_rejected() {
        assert!(matches!(
            Cep::parse("013101000"),
            Err(CepError::WrongLength { .. })
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(Cep::parse("").is_err());
    }

    #[test]
    fn test_letters_rejected() {
        assert!(matches!(
            Cep::parse("01310-10a"),
            Err(CepError::NonDigit { .. })
        ));
    }

    #[test]
    fn test_misplaced_hyphen_rejected() {
        assert!(matches!(
            Cep::parse("013-10100"),
            Err(CepError::MisplacedHyphen { .. })
        ));
        assert!(matches!(
            Cep::parse("01310-1-00"),
            Err(CepError::MisplacedHyphen { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let cep = Cep::parse("01310-100").unwrap();
        let json = serde_json::to_string(&cep).unwrap();
        assert_eq!(json, "\"01310-100\"");
        let back: Cep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cep);
    }

    #[test]
    fn test_deserialize_bare_form() {
        let cep: Cep = serde_json::from_str("\"01310100\"").unwrap();
        assert_eq!(cep.as_str(), "01310100");
    }

    #[test]
    fn test_deserialize_invalid_fails() {
        assert!(serde_json::from_str::<Cep>("\"garbage\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every 8-digit string parses, and normalizes to itself.
        #[test]
        fn all_eight_digit_strings_parse(code in "[0-9]{8}") {
            let cep = Cep::parse(&code).unwrap();
            prop_assert_eq!(cep.as_str(), code.as_str());
        }

        /// The hyphenated rendering of a valid CEP re-parses to the same value.
        #[test]
        fn hyphenated_form_round_trips(code in "[0-9]{8}") {
            let cep = Cep::parse(&code).unwrap();
            let reparsed = Cep::parse(&cep.hyphenated()).unwrap();
            prop_assert_eq!(cep, reparsed);
        }

        /// Strings with a non-digit character never parse.
        #[test]
        fn non_digit_strings_rejected(code in "[0-9]{0,4}[a-zA-Z][0-9]{0,4}") {
            prop_assert!(Cep::parse(&code).is_err());
        }
    }
}
