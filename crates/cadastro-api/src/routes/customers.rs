// SPDX-License-Identifier: AGPL-3.0-or-later
//! # Customer API
//!
//! Customer CRUD over the [`CustomerService`] trait. No business logic in
//! handlers — address resolution, referential integrity, and the
//! absence/failure distinction all live in cadastro-service; this layer
//! only maps payloads and outcomes.
//!
//! Routes:
//! - GET    /v1/customers — List customers
//! - POST   /v1/customers — Create customer (resolves the CEP)
//! - GET    /v1/customers/{id} — Get customer
//! - PUT    /v1/customers/{id} — Update customer (resolves the CEP)
//! - DELETE /v1/customers/{id} — Delete customer (idempotent)

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use cadastro_core::{Customer, CustomerDraft, CustomerId};

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Customer write payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerRequest {
    pub name: String,
    pub document: String,
    pub address: AddressRef,
}

/// Address reference in a write payload: only the postal code. The service
/// resolves it to a full address before anything is persisted.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddressRef {
    /// Postal code, `NNNNNNNN` or `NNNNN-NNN`.
    pub cep: String,
}

impl Validate for CustomerRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.name.len() > 255 {
            return Err("name must not exceed 255 characters".to_string());
        }
        if self.document.trim().is_empty() {
            return Err("document must not be empty".to_string());
        }
        if self.document.len() > 64 {
            return Err("document must not exceed 64 characters".to_string());
        }
        // The CEP itself is validated by the resolver, before any I/O.
        Ok(())
    }
}

impl From<CustomerRequest> for CustomerDraft {
    fn from(req: CustomerRequest) -> Self {
        CustomerDraft {
            name: req.name,
            document: req.document,
            cep: req.address.cep,
        }
    }
}

/// A customer record as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub address: AddressBody,
}

/// A resolved address as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddressBody {
    /// Postal code in hyphenated form.
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        CustomerResponse {
            id: *customer.id.as_uuid(),
            name: customer.name,
            document: customer.document,
            address: AddressBody {
                cep: customer.address.cep.to_string(),
                street: customer.address.street,
                neighborhood: customer.address.neighborhood,
                city: customer.address.city,
                state: customer.address.state,
            },
        }
    }
}

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/customers", get(list_customers).post(create_customer))
        .route(
            "/v1/customers/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

/// GET /v1/customers — List all customers.
#[utoipa::path(
    get,
    path = "/v1/customers",
    responses(
        (status = 200, description = "All customer records", body = [CustomerResponse]),
    ),
    tag = "customers"
)]
async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = state.customers.list_all().await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// GET /v1/customers/{id} — Get one customer.
#[utoipa::path(
    get,
    path = "/v1/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "The customer record", body = CustomerResponse),
        (status = 404, description = "No such customer", body = ErrorBody),
    ),
    tag = "customers"
)]
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = state
        .customers
        .get_by_id(&CustomerId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;
    Ok(Json(customer.into()))
}

/// POST /v1/customers — Create a customer.
#[utoipa::path(
    post,
    path = "/v1/customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created with resolved address", body = CustomerResponse),
        (status = 422, description = "Invalid payload or unresolvable CEP", body = ErrorBody),
    ),
    tag = "customers"
)]
async fn create_customer(
    State(state): State<AppState>,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let customer = state.customers.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// PUT /v1/customers/{id} — Update a customer.
#[utoipa::path(
    put,
    path = "/v1/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer identifier")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 404, description = "No such customer — nothing written", body = ErrorBody),
        (status = 422, description = "Invalid payload or unresolvable CEP", body = ErrorBody),
    ),
    tag = "customers"
)]
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<Json<CustomerResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let updated = state
        .customers
        .update(&CustomerId(id), req.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;
    Ok(Json(updated.into()))
}

/// DELETE /v1/customers/{id} — Delete a customer.
#[utoipa::path(
    delete,
    path = "/v1/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer identifier")),
    responses(
        (status = 204, description = "Deleted (or already absent)"),
    ),
    tag = "customers"
)]
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.customers.delete(&CustomerId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
