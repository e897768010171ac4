// SPDX-License-Identifier: AGPL-3.0-or-later
//! # cadastro-service — Domain Services
//!
//! The decision logic of the stack, composed linearly:
//!
//! - [`AddressResolver`] (leaf): given a postal code, return an address —
//!   consulting the address store first and the ViaCEP directory second,
//!   persisting newly fetched addresses.
//! - [`CustomerService`] (depends on the resolver and a customer store):
//!   orchestrates create/update of a customer record, delegating address
//!   acquisition to the resolver before persisting the customer.
//!
//! ## Invariants
//!
//! - At most one external lookup per distinct CEP, absent concurrent
//!   duplicate fetches (see [`AddressResolver`] on the accepted race).
//! - A customer write happens only after address resolution fully succeeds;
//!   any resolution failure aborts the operation with nothing persisted.
//! - Absence (`Ok(None)`) and failure (`Err`) are distinct signals, never
//!   collapsed into one path.

pub mod error;
pub mod registry;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ResolveError, ServiceError};
pub use registry::{CustomerRegistry, CustomerService};
pub use resolver::AddressResolver;
