// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Customer Service
//!
//! The [`CustomerService`] trait is the capability set the transport layer
//! consumes — one concrete implementation here ([`CustomerRegistry`]), with
//! the trait seam keeping alternate backends (and test doubles) possible
//! without inheritance.
//!
//! Each write runs Validating → ResolvingAddress → Persisting → Done, where
//! ResolvingAddress can terminate the operation early with a resolution
//! failure and the update path's existence check can terminate it early
//! with the `Ok(None)` absence signal.

use std::sync::Arc;

use async_trait::async_trait;

use cadastro_core::{Customer, CustomerDraft, CustomerId, NewCustomer};
use cadastro_store::CustomerStore;

use crate::error::ServiceError;
use crate::resolver::AddressResolver;

/// Customer lifecycle operations.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// All customer records. Pure delegation to the store.
    async fn list_all(&self) -> Result<Vec<Customer>, ServiceError>;

    /// One customer by id. `Ok(None)` is the absence signal, distinct from
    /// any failure.
    async fn get_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, ServiceError>;

    /// Create a customer: resolve the draft's postal code, bind the
    /// canonical address, persist. Resolution failure aborts with nothing
    /// persisted.
    async fn create(&self, draft: CustomerDraft) -> Result<Customer, ServiceError>;

    /// Update an existing customer with the same address guarantee as
    /// `create`. An absent id is a pure no-op returning `Ok(None)` — no
    /// address resolution, no write.
    async fn update(
        &self,
        id: &CustomerId,
        draft: CustomerDraft,
    ) -> Result<Option<Customer>, ServiceError>;

    /// Delete by id. Idempotent.
    async fn delete(&self, id: &CustomerId) -> Result<(), ServiceError>;
}

/// The one concrete [`CustomerService`]: a customer store plus the
/// read-through address resolver.
pub struct CustomerRegistry {
    customers: Arc<dyn CustomerStore>,
    resolver: AddressResolver,
}

impl CustomerRegistry {
    pub fn new(customers: Arc<dyn CustomerStore>, resolver: AddressResolver) -> Self {
        Self {
            customers,
            resolver,
        }
    }

    /// Resolve the draft's postal code into the persisted shape.
    async fn resolve_draft(&self, draft: CustomerDraft) -> Result<NewCustomer, ServiceError> {
        let address = self.resolver.resolve(&draft.cep).await?;
        Ok(NewCustomer {
            name: draft.name,
            document: draft.document,
            address,
        })
    }
}

#[async_trait]
impl CustomerService for CustomerRegistry {
    async fn list_all(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.customers.find_all().await?)
    }

    async fn get_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, ServiceError> {
        Ok(self.customers.find_by_id(id).await?)
    }

    async fn create(&self, draft: CustomerDraft) -> Result<Customer, ServiceError> {
        let new = self.resolve_draft(draft).await?;
        let customer = self.customers.insert(new).await?;
        tracing::info!(id = %customer.id, cep = %customer.address.cep, "customer created");
        Ok(customer)
    }

    async fn update(
        &self,
        id: &CustomerId,
        draft: CustomerDraft,
    ) -> Result<Option<Customer>, ServiceError> {
        // Existence check before resolution: updating a nonexistent
        // customer must not trigger a directory lookup or any write.
        if self.customers.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let new = self.resolve_draft(draft).await?;
        let updated = self.customers.update(id, new).await?;
        if updated.is_some() {
            tracing::info!(%id, "customer updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), ServiceError> {
        self.customers.delete_by_id(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cadastro_store::{AddressStore, InMemoryAddressStore, InMemoryCustomerStore};

    use crate::error::ResolveError;
    use crate::testing::{copacabana, paulista, StaticLookup};

    struct Fixture {
        registry: CustomerRegistry,
        lookup: Arc<StaticLookup>,
        addresses: Arc<InMemoryAddressStore>,
        customers: Arc<InMemoryCustomerStore>,
    }

    fn fixture(lookup: StaticLookup) -> Fixture {
        let lookup = Arc::new(lookup);
        let addresses = Arc::new(InMemoryAddressStore::new());
        let customers = Arc::new(InMemoryCustomerStore::new());
        let resolver = AddressResolver::new(addresses.clone(), lookup.clone());
        let registry = CustomerRegistry::new(customers.clone(), resolver);
        Fixture {
            registry,
            lookup,
            addresses,
            customers,
        }
    }

    fn draft(name: &str, cep: &str) -> CustomerDraft {
        CustomerDraft {
            name: name.to_string(),
            document: "123.456.789-00".to_string(),
            cep: cep.to_string(),
        }
    }

    #[tokio::test]
    async fn create_binds_resolved_address_and_assigns_id() {
        let f = fixture(StaticLookup::with(vec![paulista()]));

        let customer = f.registry.create(draft("Ana", "01310-100")).await.unwrap();

        assert_eq!(customer.name, "Ana");
        assert_eq!(customer.address, paulista());
        assert_eq!(
            f.registry.get_by_id(&customer.id).await.unwrap(),
            Some(customer.clone())
        );
        // The resolved address is now cached.
        assert_eq!(
            f.addresses.find_by_cep(&customer.address.cep).await.unwrap(),
            Some(paulista())
        );
    }

    #[tokio::test]
    async fn second_customer_shares_the_cached_address() {
        let f = fixture(StaticLookup::with(vec![paulista()]));

        let first = f.registry.create(draft("Ana", "01310-100")).await.unwrap();
        let second = f.registry.create(draft("Bruno", "01310100")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.address, second.address);
        assert_eq!(f.lookup.calls(), 1, "directory must be hit exactly once");
    }

    #[tokio::test]
    async fn create_with_unknown_cep_persists_nothing() {
        let f = fixture(StaticLookup::empty());

        let err = f.registry.create(draft("Ana", "00000-000")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Resolve(ResolveError::CepNotFound { .. })
        ));

        assert!(f.registry.list_all().await.unwrap().is_empty());
        let cep = cadastro_core::Cep::parse("00000-000").unwrap();
        assert_eq!(f.addresses.find_by_cep(&cep).await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_with_malformed_cep_fails_without_io() {
        let f = fixture(StaticLookup::with(vec![paulista()]));

        let err = f.registry.create(draft("Ana", "bogus")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Resolve(ResolveError::InvalidCep(_))
        ));
        assert_eq!(f.lookup.calls(), 0);
        assert!(f.registry.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_absent_customer_is_a_pure_noop() {
        let f = fixture(StaticLookup::with(vec![paulista()]));

        let result = f
            .registry
            .update(&CustomerId::new(), draft("Ghost", "01310-100"))
            .await
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(f.lookup.calls(), 0, "no resolution for a missing customer");
        assert!(f.customers.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_reresolves_and_keeps_the_id() {
        let f = fixture(StaticLookup::with(vec![paulista(), copacabana()]));

        let created = f.registry.create(draft("Ana", "01310-100")).await.unwrap();
        let updated = f
            .registry
            .update(&created.id, draft("Ana Maria", "22070-011"))
            .await
            .unwrap()
            .expect("customer exists");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.address, copacabana());
    }

    #[tokio::test]
    async fn update_with_unknown_cep_leaves_record_untouched() {
        let f = fixture(StaticLookup::with(vec![paulista()]));

        let created = f.registry.create(draft("Ana", "01310-100")).await.unwrap();
        let err = f
            .registry
            .update(&created.id, draft("Ana", "99999-999"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Resolve(_)));

        // The stored record still carries the original state.
        assert_eq!(
            f.registry.get_by_id(&created.id).await.unwrap(),
            Some(created)
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let f = fixture(StaticLookup::with(vec![paulista()]));

        let created = f.registry.create(draft("Ana", "01310-100")).await.unwrap();
        f.registry.delete(&created.id).await.unwrap();
        assert_eq!(f.registry.get_by_id(&created.id).await.unwrap(), None);

        // Deleting the same id again completes without error.
        f.registry.delete(&created.id).await.unwrap();
    }

    #[tokio::test]
    async fn list_all_reflects_every_insert() {
        let f = fixture(StaticLookup::with(vec![paulista(), copacabana()]));

        f.registry.create(draft("Ana", "01310-100")).await.unwrap();
        f.registry.create(draft("Bruno", "22070-011")).await.unwrap();

        let all = f.registry.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
