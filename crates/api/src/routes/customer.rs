use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use prisbo_db::models::{ActivityCategory, Customer, CustomerStatus};
use prisbo_services::dao::base::PaginationParams;
use serde::{Deserialize, Serialize};

use super::{fmt_datetime, parse_object_id, require_fields};
use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<CustomerStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<CustomerStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerResponse>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

fn to_response(customer: Customer) -> CustomerResponse {
    CustomerResponse {
        id: customer.id.map(|id| id.to_hex()).unwrap_or_default(),
        name: customer.name,
        email: customer.email,
        phone: customer.phone,
        status: format!("{:?}", customer.status).to_lowercase(),
        notes: customer.notes,
        created_by: customer.created_by.to_hex(),
        created_at: fmt_datetime(customer.created_at),
    }
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    require_fields(&[
        ("name", body.name.is_some()),
        ("email", body.email.is_some()),
        ("phone", body.phone.is_some()),
        ("status", body.status.is_some()),
    ])?;

    let name = body.name.unwrap_or_default();
    let customer = state
        .customers
        .create(
            auth.scope(),
            auth.user_id,
            name.clone(),
            body.email.unwrap_or_default(),
            body.phone.unwrap_or_default(),
            body.status.unwrap_or_default(),
            body.notes,
        )
        .await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Customer,
            "Customer Created",
            format!("Created customer: {name}"),
            auth.user_id,
            customer.id,
        )
        .await;

    Ok((StatusCode::CREATED, Json(to_response(customer))))
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<CustomerListResponse>, ApiError> {
    let result = state
        .customers
        .list(
            auth.scope(),
            query.search.as_deref(),
            query.status,
            &PaginationParams::new(query.page, query.limit),
        )
        .await?;

    Ok(Json(CustomerListResponse {
        customers: result.items.into_iter().map(to_response).collect(),
        total: result.total,
        page: result.page,
        total_pages: result.total_pages,
    }))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let id = parse_object_id(&id, "customer id")?;
    let customer = state.customers.base.find_by_id_scoped(auth.scope(), id).await?;
    Ok(Json(to_response(customer)))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let id = parse_object_id(&id, "customer id")?;

    let customer = state
        .customers
        .update(
            auth.scope(),
            id,
            body.name,
            body.email,
            body.phone,
            body.status,
            body.notes,
        )
        .await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Customer,
            "Customer Updated",
            format!("Updated customer: {}", customer.name),
            auth.user_id,
            customer.id,
        )
        .await;

    Ok(Json(to_response(customer)))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_object_id(&id, "customer id")?;

    let customer = state.customers.base.delete_by_id_scoped(auth.scope(), id).await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Customer,
            "Customer Deleted",
            format!("Deleted customer: {}", customer.name),
            auth.user_id,
            customer.id,
        )
        .await;

    Ok(Json(
        serde_json::json!({ "message": "Customer deleted successfully" }),
    ))
}
