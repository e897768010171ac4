// SPDX-License-Identifier: AGPL-3.0-or-later
//! # cadastro-core — Foundational Types for the Cadastro Stack
//!
//! This crate is the bedrock of the Cadastro Stack. It defines the domain
//! primitives shared by every other crate in the workspace; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`Cep`] and [`CustomerId`]
//!    are newtypes with validated constructors. No bare strings for postal
//!    codes, no bare UUIDs for customer identity.
//!
//! 2. **A persisted [`Customer`] always embeds a resolved [`Address`].**
//!    Unresolved input lives in [`CustomerDraft`], where the postal code is
//!    still a raw string; [`NewCustomer`] is the resolved, ready-to-persist
//!    shape. The type system makes "customer with a dangling address" hard
//!    to construct by accident.
//!
//! 3. **Addresses are immutable values.** An [`Address`] is identified
//!    solely by its CEP and never changes once created — two addresses with
//!    the same CEP are interchangeable.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cadastro-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod cep;
pub mod error;
pub mod model;

// Re-export primary types for ergonomic imports.
pub use cep::Cep;
pub use error::CepError;
pub use model::{Address, Customer, CustomerDraft, CustomerId, NewCustomer};
