// SPDX-License-Identifier: AGPL-3.0-or-later
//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cadastro API — Customer Registry",
        description = "Customer records bound to ViaCEP-resolved postal addresses.\n\nAddresses are resolved at most once per distinct CEP: the service consults its address store first and the ViaCEP directory second, persisting newly fetched addresses. A customer is never persisted with an unresolved address — any resolution failure aborts the write with nothing persisted.",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::customers::list_customers,
        crate::routes::customers::get_customer,
        crate::routes::customers::create_customer,
        crate::routes::customers::update_customer,
        crate::routes::customers::delete_customer,
    ),
    components(schemas(
        crate::routes::customers::CustomerRequest,
        crate::routes::customers::AddressRef,
        crate::routes::customers::CustomerResponse,
        crate::routes::customers::AddressBody,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "customers", description = "Customer lifecycle operations"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
