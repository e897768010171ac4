// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Domain Records
//!
//! The address and customer records shared across the stack, plus the
//! [`CustomerId`] identifier newtype.
//!
//! An [`Address`] is an immutable value identified solely by its CEP —
//! resolved once, persisted once, shared by every customer at that code.
//! [`CustomerDraft`] is the unresolved write payload (raw postal code);
//! [`NewCustomer`] is the resolved shape a store accepts for persistence.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cep::Cep;

/// Unique identifier for a customer record.
///
/// Assigned by the customer store on insert, never by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub Uuid);

impl CustomerId {
    /// Generate a new random customer identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer:{}", self.0)
    }
}

/// A resolved postal address, keyed by CEP.
///
/// Immutable once persisted. Two addresses with the same CEP carry identical
/// content regardless of which caller resolved them — overwriting one with
/// the other is a no-op in effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// The postal code identifying this address.
    pub cep: Cep,
    /// Street line (ViaCEP `logradouro`). May be empty for city-wide codes.
    pub street: String,
    /// Neighborhood (ViaCEP `bairro`). May be empty for city-wide codes.
    pub neighborhood: String,
    /// City name (ViaCEP `localidade`).
    pub city: String,
    /// Two-letter state code (ViaCEP `uf`).
    pub state: String,
}

/// A persisted customer record, always bound to a resolved [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned identifier.
    pub id: CustomerId,
    /// Customer name.
    pub name: String,
    /// Document identifier (e.g. CPF).
    pub document: String,
    /// The resolved address. Shared, not owned: many customers may carry
    /// the same address content.
    pub address: Address,
}

/// Incoming customer write payload: the postal code is still raw.
///
/// The code is validated inside address resolution, before any I/O, not at
/// deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    /// Customer name.
    pub name: String,
    /// Document identifier (e.g. CPF).
    pub document: String,
    /// Raw postal code, resolved to an [`Address`] before any persistence.
    pub cep: String,
}

/// A customer ready for persistence: resolved address, no identifier yet.
///
/// The store assigns the [`CustomerId`] on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    /// Customer name.
    pub name: String,
    /// Document identifier (e.g. CPF).
    pub document: String,
    /// The resolved, persisted address to bind.
    pub address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paulista() -> Address {
        Address {
            cep: Cep::parse("01310-100").unwrap(),
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        }
    }

    #[test]
    fn test_customer_id_display_prefix() {
        let id = CustomerId::new();
        assert!(id.to_string().starts_with("customer:"));
    }

    #[test]
    fn test_customer_ids_are_distinct() {
        assert_ne!(CustomerId::new(), CustomerId::new());
    }

    #[test]
    fn test_address_serializes_hyphenated_cep() {
        let json = serde_json::to_value(paulista()).unwrap();
        assert_eq!(json["cep"], "01310-100");
        assert_eq!(json["city"], "São Paulo");
    }

    #[test]
    fn test_customer_round_trips_through_json() {
        let customer = Customer {
            id: CustomerId::new(),
            name: "Ana".to_string(),
            document: "123.456.789-00".to_string(),
            address: paulista(),
        };
        let json = serde_json::to_string(&customer).unwrap();
        let back: Customer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, customer);
    }

    #[test]
    fn test_draft_keeps_raw_cep() {
        // A draft with a malformed code must still deserialize — rejection
        // belongs to the resolver, not the serde layer.
        let draft: CustomerDraft =
            serde_json::from_str(r#"{"name":"Ana","document":"1","cep":"bogus"}"#).unwrap();
        assert_eq!(draft.cep, "bogus");
    }
}
