// SPDX-License-Identifier: AGPL-3.0-or-later
//! # cadastro-store — Persistence Collaborators
//!
//! Store traits for addresses and customers, with two backends each:
//!
//! - **In-memory** (`DashMap`) — development and testing; mirrors the
//!   embedded-database mode the service runs in without `DATABASE_URL`.
//!   Data is lost on restart.
//! - **Postgres** (SQLx) — production persistence, selected at startup when
//!   `DATABASE_URL` is set. Embedded migrations under `./migrations`.
//!
//! ## Contract
//!
//! - Addresses are keyed by CEP and immutable: [`AddressStore::save`] is
//!   insert-or-overwrite, and overwriting with content-identical data is
//!   harmless. Concurrent resolvers racing on the same uncached CEP may both
//!   save — the backends tolerate the duplicate write.
//! - [`CustomerStore::insert`] assigns the [`CustomerId`]; callers never
//!   pick identifiers.
//! - Absence is `Ok(None)` everywhere. `Err` means the backend itself
//!   failed, and callers treat that as fatal for the request.

pub mod error;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use cadastro_core::{Address, Cep, Customer, CustomerId, NewCustomer};

pub use error::StoreError;
pub use memory::{InMemoryAddressStore, InMemoryCustomerStore};
pub use postgres::{init_pool, PgAddressStore, PgCustomerStore};

/// Keyed store of resolved addresses. No update or delete: addresses are
/// immutable once persisted.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Look up a previously persisted address by its CEP.
    async fn find_by_cep(&self, cep: &Cep) -> Result<Option<Address>, StoreError>;

    /// Persist an address keyed by its CEP. Insert-or-overwrite; a duplicate
    /// write of content-identical data is a no-op in effect.
    async fn save(&self, address: &Address) -> Result<(), StoreError>;
}

/// Store of customer records.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customer records.
    async fn find_all(&self) -> Result<Vec<Customer>, StoreError>;

    /// Look up one customer. `Ok(None)` is the absence signal.
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Insert a new customer, assigning its identifier.
    async fn insert(&self, new: NewCustomer) -> Result<Customer, StoreError>;

    /// Replace the record under an existing identifier. Returns `Ok(None)`
    /// without writing when the identifier is absent.
    async fn update(
        &self,
        id: &CustomerId,
        new: NewCustomer,
    ) -> Result<Option<Customer>, StoreError>;

    /// Delete by identifier. Idempotent: deleting an absent id succeeds.
    async fn delete_by_id(&self, id: &CustomerId) -> Result<(), StoreError>;
}
