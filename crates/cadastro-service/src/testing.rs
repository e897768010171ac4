// SPDX-License-Identifier: AGPL-3.0-or-later
//! Test doubles and fixtures shared by the service test modules.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use cadastro_core::{Address, Cep};
use cadastro_viacep::{CepLookup, LookupError};

/// Fixture: the Avenida Paulista address used throughout the tests.
pub fn paulista() -> Address {
    Address {
        cep: Cep::parse("01310-100").unwrap(),
        street: "Avenida Paulista".to_string(),
        neighborhood: "Bela Vista".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
    }
}

/// Fixture: a second address, distinct from [`paulista`].
pub fn copacabana() -> Address {
    Address {
        cep: Cep::parse("22070-011").unwrap(),
        street: "Avenida Atlântica".to_string(),
        neighborhood: "Copacabana".to_string(),
        city: "Rio de Janeiro".to_string(),
        state: "RJ".to_string(),
    }
}

/// Canned-response directory double that counts its calls.
///
/// Codes without an entry fail with [`LookupError::CepNotFound`], the same
/// classification the real client gives ViaCEP's `erro` marker.
pub struct StaticLookup {
    entries: HashMap<String, Address>,
    calls: AtomicUsize,
}

impl StaticLookup {
    /// A directory knowing the given addresses, keyed by their CEPs.
    pub fn with(addresses: Vec<Address>) -> Self {
        Self {
            entries: addresses
                .into_iter()
                .map(|a| (a.cep.as_str().to_string(), a))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// A directory that knows nothing: every fetch fails.
    pub fn empty() -> Self {
        Self::with(Vec::new())
    }

    /// How many times `fetch` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CepLookup for StaticLookup {
    async fn fetch(&self, cep: &Cep) -> Result<Address, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .get(cep.as_str())
            .cloned()
            .ok_or_else(|| LookupError::CepNotFound { cep: cep.clone() })
    }
}
