// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Address Resolver — Read-Through CEP Cache
//!
//! Produces exactly one canonical, persisted [`Address`] per postal code,
//! minimizing external directory calls:
//!
//! ```text
//! resolve(raw) ── parse ──▶ store.find_by_cep ── hit ──▶ Address
//!                                │
//!                              miss
//!                                ▼
//!                          lookup.fetch ── failure ──▶ CepNotFound
//!                                │
//!                             success
//!                                ▼
//!                          store.save ──▶ Address
//! ```
//!
//! The check-fetch-persist sequence is deliberately not atomic: two
//! concurrent resolutions of the same uncached code may both fetch and both
//! save. Because an address is immutable and content-identical per CEP, the
//! stores treat the duplicate write as a no-op and the race is harmless.
//! No per-key in-flight lock collapses concurrent fetches.

use std::sync::Arc;

use cadastro_core::{Address, Cep};
use cadastro_store::AddressStore;
use cadastro_viacep::CepLookup;

use crate::error::ResolveError;

/// Read-through cache over the address store and the ViaCEP directory.
pub struct AddressResolver {
    addresses: Arc<dyn AddressStore>,
    lookup: Arc<dyn CepLookup>,
}

impl AddressResolver {
    pub fn new(addresses: Arc<dyn AddressStore>, lookup: Arc<dyn CepLookup>) -> Self {
        Self { addresses, lookup }
    }

    /// Resolve a raw postal code to a canonical, persisted address.
    ///
    /// Malformed input fails with [`ResolveError::InvalidCep`] before any
    /// I/O. A cache hit returns the stored address with zero external
    /// calls; a miss fetches from the directory and persists the result.
    /// A failed lookup persists nothing.
    pub async fn resolve(&self, raw: &str) -> Result<Address, ResolveError> {
        let cep = Cep::parse(raw)?;

        if let Some(address) = self.addresses.find_by_cep(&cep).await? {
            tracing::debug!(%cep, "address cache hit");
            return Ok(address);
        }

        let address = self.lookup.fetch(&cep).await.map_err(|e| {
            tracing::warn!(%cep, error = %e, "ViaCEP lookup failed");
            ResolveError::CepNotFound {
                cep: cep.clone(),
                reason: e.to_string(),
            }
        })?;

        self.addresses.save(&address).await?;
        tracing::info!(%cep, city = %address.city, "address resolved and cached");
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cadastro_store::InMemoryAddressStore;

    use crate::testing::{paulista, StaticLookup};

    fn resolver_with(
        lookup: Arc<StaticLookup>,
    ) -> (AddressResolver, Arc<InMemoryAddressStore>) {
        let store = Arc::new(InMemoryAddressStore::new());
        let resolver = AddressResolver::new(store.clone(), lookup);
        (resolver, store)
    }

    #[tokio::test]
    async fn malformed_cep_fails_before_any_lookup() {
        let lookup = Arc::new(StaticLookup::with(vec![paulista()]));
        let (resolver, _) = resolver_with(lookup.clone());

        let err = resolver.resolve("not-a-cep").await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidCep(_)));
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn cache_hit_makes_zero_external_calls() {
        let lookup = Arc::new(StaticLookup::with(vec![paulista()]));
        let (resolver, store) = resolver_with(lookup.clone());
        store.save(&paulista()).await.unwrap();

        let address = resolver.resolve("01310-100").await.unwrap();
        assert_eq!(address, paulista());
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn cache_miss_fetches_once_and_persists() {
        let lookup = Arc::new(StaticLookup::with(vec![paulista()]));
        let (resolver, store) = resolver_with(lookup.clone());

        let address = resolver.resolve("01310-100").await.unwrap();
        assert_eq!(address, paulista());
        assert_eq!(lookup.calls(), 1);

        // The fetched address is now retrievable from the store.
        let cached = store.find_by_cep(&address.cep).await.unwrap();
        assert_eq!(cached, Some(paulista()));
    }

    #[tokio::test]
    async fn second_resolution_is_served_from_the_store() {
        let lookup = Arc::new(StaticLookup::with(vec![paulista()]));
        let (resolver, _) = resolver_with(lookup.clone());

        let first = resolver.resolve("01310-100").await.unwrap();
        let second = resolver.resolve("01310100").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(lookup.calls(), 1, "directory must be hit exactly once");
    }

    #[tokio::test]
    async fn failed_lookup_persists_nothing() {
        let lookup = Arc::new(StaticLookup::empty());
        let (resolver, store) = resolver_with(lookup.clone());

        let err = resolver.resolve("00000-000").await.unwrap_err();
        match err {
            ResolveError::CepNotFound { cep, .. } => {
                assert_eq!(cep.to_string(), "00000-000");
                assert_eq!(store.find_by_cep(&cep).await.unwrap(), None);
            }
            other => panic!("expected CepNotFound, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_lookup_is_retried_on_next_resolution() {
        // No silent negative caching: a failure leaves the store empty, so
        // the next resolve consults the directory again.
        let lookup = Arc::new(StaticLookup::empty());
        let (resolver, _) = resolver_with(lookup.clone());

        let _ = resolver.resolve("00000-000").await.unwrap_err();
        let _ = resolver.resolve("00000-000").await.unwrap_err();
        assert_eq!(lookup.calls(), 2);
    }
}
