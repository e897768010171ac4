// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Middleware Modules
//!
//! Tower middleware layers for the API service.

pub mod metrics;
