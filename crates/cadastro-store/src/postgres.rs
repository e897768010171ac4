// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Postgres Backends
//!
//! SQLx-backed stores. The database layer is **optional**: when
//! `DATABASE_URL` is set, addresses and customers persist to PostgreSQL;
//! when absent, the composing binary falls back to the in-memory backends
//! (suitable for development and testing).
//!
//! Address writes use `ON CONFLICT (cep) DO NOTHING` — two resolvers racing
//! on the same uncached CEP both save content-identical rows, and the second
//! write is dropped harmlessly.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use cadastro_core::{Address, Cep, Customer, CustomerId, NewCustomer};

use crate::error::StoreError;
use crate::{AddressStore, CustomerStore};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 State will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    // Run embedded migrations.
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

// ─── Address store ──────────────────────────────────────────────────

/// Postgres-backed address store over the `addresses` table.
#[derive(Debug, Clone)]
pub struct PgAddressStore {
    pool: PgPool,
}

impl PgAddressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    cep: String,
    street: String,
    neighborhood: String,
    city: String,
    state: String,
}

impl AddressRow {
    /// Convert a database row into a domain address.
    ///
    /// Returns `None` (with a warning) if the stored CEP no longer parses —
    /// a corrupt row is treated as absent rather than poisoning reads.
    fn into_address(self) -> Option<Address> {
        match Cep::parse(&self.cep) {
            Ok(cep) => Some(Address {
                cep,
                street: self.street,
                neighborhood: self.neighborhood,
                city: self.city,
                state: self.state,
            }),
            Err(e) => {
                tracing::warn!(cep = %self.cep, error = %e, "skipping address row with invalid CEP");
                None
            }
        }
    }
}

#[async_trait]
impl AddressStore for PgAddressStore {
    async fn find_by_cep(&self, cep: &Cep) -> Result<Option<Address>, StoreError> {
        let row = sqlx::query_as::<_, AddressRow>(
            "SELECT cep, street, neighborhood, city, state FROM addresses WHERE cep = $1",
        )
        .bind(cep.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(AddressRow::into_address))
    }

    async fn save(&self, address: &Address) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO addresses (cep, street, neighborhood, city, state)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (cep) DO NOTHING",
        )
        .bind(address.cep.as_str())
        .bind(&address.street)
        .bind(&address.neighborhood)
        .bind(&address.city)
        .bind(&address.state)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ─── Customer store ─────────────────────────────────────────────────

/// Postgres-backed customer store over the `customers` table, joined to
/// `addresses` on read so a returned [`Customer`] always embeds its address.
#[derive(Debug, Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    document: String,
    cep: String,
    street: String,
    neighborhood: String,
    city: String,
    state: String,
}

impl CustomerRow {
    fn into_customer(self) -> Option<Customer> {
        let cep = match Cep::parse(&self.cep) {
            Ok(cep) => cep,
            Err(e) => {
                tracing::warn!(cep = %self.cep, error = %e, "skipping customer row with invalid CEP");
                return None;
            }
        };
        Some(Customer {
            id: CustomerId(self.id),
            name: self.name,
            document: self.document,
            address: Address {
                cep,
                street: self.street,
                neighborhood: self.neighborhood,
                city: self.city,
                state: self.state,
            },
        })
    }
}

const CUSTOMER_SELECT: &str = "SELECT c.id, c.name, c.document, a.cep, a.street, a.neighborhood, a.city, a.state
     FROM customers c JOIN addresses a ON a.cep = c.address_cep";

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn find_all(&self) -> Result<Vec<Customer>, StoreError> {
        let rows = sqlx::query_as::<_, CustomerRow>(CUSTOMER_SELECT)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().filter_map(CustomerRow::into_customer).collect())
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        let query = format!("{CUSTOMER_SELECT} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CustomerRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(CustomerRow::into_customer))
    }

    async fn insert(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        let id = CustomerId::new();
        sqlx::query(
            "INSERT INTO customers (id, name, document, address_cep) VALUES ($1, $2, $3, $4)",
        )
        .bind(id.as_uuid())
        .bind(&new.name)
        .bind(&new.document)
        .bind(new.address.cep.as_str())
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id,
            name: new.name,
            document: new.document,
            address: new.address,
        })
    }

    async fn update(
        &self,
        id: &CustomerId,
        new: NewCustomer,
    ) -> Result<Option<Customer>, StoreError> {
        let result = sqlx::query(
            "UPDATE customers SET name = $2, document = $3, address_cep = $4 WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(&new.name)
        .bind(&new.document)
        .bind(new.address.cep.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Customer {
            id: *id,
            name: new.name,
            document: new.document,
            address: new.address,
        }))
    }

    async fn delete_by_id(&self, id: &CustomerId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
