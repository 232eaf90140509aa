//! REST handlers for customers. Reads answer in JSON or XML, following the
//! `Accept` header; request bodies are JSON.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use clientele_app::ports::CustomerRepository;
use clientele_domain::customer::{Customer, CustomerDetails};
use clientele_domain::id::CustomerId;

use crate::api::CUSTOMERS_PATH;
use crate::error::ApiError;
use crate::extract::{Format, JsonBody};
use crate::state::AppState;
use crate::xml::Xml;

/// XML form of a customer collection: `<customers><customer>…</customer></customers>`.
#[derive(Debug, Serialize)]
#[serde(rename = "customers")]
pub struct CustomerList {
    #[serde(rename = "customer")]
    pub customers: Vec<Customer>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Json(Json<Vec<Customer>>),
    Xml(Xml<CustomerList>),
    NoContent,
}

impl ListResponse {
    fn negotiated(format: Format, customers: Vec<Customer>) -> Self {
        match format {
            Format::Json => Self::Json(Json(customers)),
            Format::Xml => Self::Xml(Xml(CustomerList { customers })),
        }
    }
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Json(json) => json.into_response(),
            Self::Xml(xml) => xml.into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Json(Json<Customer>),
    Xml(Xml<Customer>),
}

impl GetResponse {
    fn negotiated(format: Format, customer: Customer) -> Self {
        match format {
            Format::Json => Self::Json(Json(customer)),
            Format::Xml => Self::Xml(Xml(customer)),
        }
    }
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Json(json) => json.into_response(),
            Self::Xml(xml) => xml.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    /// Carries the canonical path of the new customer, sent as `Location`.
    Created { location: String },
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created { location } => {
                (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoints.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_id(id: &str) -> Result<CustomerId, ApiError> {
    CustomerId::from_str(id).map_err(|_| ApiError::unknown_id("Customer", id))
}

/// Canonical resource path for a customer.
#[must_use]
pub fn location_of(id: CustomerId) -> String {
    format!("{CUSTOMERS_PATH}{id}")
}

/// `GET /rest/customers/` — 204 when there is nothing to list.
pub async fn list<CR>(
    State(state): State<AppState<CR>>,
    format: Format,
) -> Result<ListResponse, ApiError>
where
    CR: CustomerRepository + Send + Sync + 'static,
{
    let customers = state.customer_service.list_customers().await?;
    if customers.is_empty() {
        return Ok(ListResponse::NoContent);
    }
    Ok(ListResponse::negotiated(format, customers))
}

/// `GET /rest/customers/:id`
pub async fn get<CR>(
    State(state): State<AppState<CR>>,
    Path(id): Path<String>,
    format: Format,
) -> Result<GetResponse, ApiError>
where
    CR: CustomerRepository + Send + Sync + 'static,
{
    let customer_id = parse_id(&id)?;
    let customer = state.customer_service.get_customer(customer_id).await?;
    Ok(GetResponse::negotiated(format, customer))
}

/// `POST /rest/customers/` — 201 with `Location`, no body.
pub async fn create<CR>(
    State(state): State<AppState<CR>>,
    JsonBody(req): JsonBody<CustomerDetails>,
) -> Result<CreateResponse, ApiError>
where
    CR: CustomerRepository + Send + Sync + 'static,
{
    let created = state.customer_service.register_customer(req).await?;
    Ok(CreateResponse::Created {
        location: location_of(created.id),
    })
}

/// `PUT /rest/customers/:id` — the path id wins over any id in the body.
pub async fn update<CR>(
    State(state): State<AppState<CR>>,
    Path(id): Path<String>,
    format: Format,
    JsonBody(req): JsonBody<CustomerDetails>,
) -> Result<GetResponse, ApiError>
where
    CR: CustomerRepository + Send + Sync + 'static,
{
    let customer_id = parse_id(&id)?;

    let mut current = state.customer_service.get_customer(customer_id).await?;
    current.apply(req);

    let updated = state.customer_service.update_customer(current).await?;
    Ok(GetResponse::negotiated(format, updated))
}

/// `DELETE /rest/customers/:id`
pub async fn delete<CR>(
    State(state): State<AppState<CR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    CR: CustomerRepository + Send + Sync + 'static,
{
    let customer_id = parse_id(&id)?;
    state.customer_service.delete_customer(customer_id).await?;
    Ok(DeleteResponse::NoContent)
}

/// `DELETE /rest/customers/` — always 204.
pub async fn delete_all<CR>(State(state): State<AppState<CR>>) -> Result<DeleteResponse, ApiError>
where
    CR: CustomerRepository + Send + Sync + 'static,
{
    state.customer_service.delete_all_customers().await?;
    Ok(DeleteResponse::NoContent)
}
