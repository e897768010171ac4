// SPDX-License-Identifier: AGPL-3.0-or-later
//! # In-Memory Backends
//!
//! `DashMap`-backed stores for development and testing. Data is lost on
//! restart. These backends never return [`StoreError`].

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use cadastro_core::{Address, Cep, Customer, CustomerId, NewCustomer};

use crate::error::StoreError;
use crate::{AddressStore, CustomerStore};

/// Address store over a `DashMap` keyed by normalized CEP.
#[derive(Debug, Default)]
pub struct InMemoryAddressStore {
    addresses: DashMap<String, Address>,
}

impl InMemoryAddressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressStore for InMemoryAddressStore {
    async fn find_by_cep(&self, cep: &Cep) -> Result<Option<Address>, StoreError> {
        Ok(self.addresses.get(cep.as_str()).map(|e| e.value().clone()))
    }

    async fn save(&self, address: &Address) -> Result<(), StoreError> {
        self.addresses
            .insert(address.cep.as_str().to_string(), address.clone());
        Ok(())
    }
}

/// Customer store over a `DashMap` keyed by UUID.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    customers: DashMap<Uuid, Customer>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_all(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.customers.iter().map(|e| e.value().clone()).collect())
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.get(id.as_uuid()).map(|e| e.value().clone()))
    }

    async fn insert(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        let customer = Customer {
            id: CustomerId::new(),
            name: new.name,
            document: new.document,
            address: new.address,
        };
        self.customers.insert(*customer.id.as_uuid(), customer.clone());
        Ok(customer)
    }

    async fn update(
        &self,
        id: &CustomerId,
        new: NewCustomer,
    ) -> Result<Option<Customer>, StoreError> {
        match self.customers.get_mut(id.as_uuid()) {
            Some(mut entry) => {
                let customer = Customer {
                    id: *id,
                    name: new.name,
                    document: new.document,
                    address: new.address,
                };
                *entry.value_mut() = customer.clone();
                Ok(Some(customer))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: &CustomerId) -> Result<(), StoreError> {
        self.customers.remove(id.as_uuid());
        Ok(())
    }
}
