// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Route Modules
//!
//! Each module defines an Axum Router for one API surface area.
//! Routers are assembled into the application in `lib.rs`.

pub mod customers;
