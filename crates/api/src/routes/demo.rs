use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use prisbo_db::models::{DemoRequest, DemoStatus, NotificationKind, UserRole};
use prisbo_services::dao::base::PaginationParams;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::{fmt_datetime, parse_datetime, parse_object_id, require_fields};
use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SubmitDemoRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TriageRequest {
    pub status: Option<DemoStatus>,
    pub notes: Option<String>,
    pub scheduled_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<DemoStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct DemoRequestResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub contacted_by: Option<String>,
    pub scheduled_date: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct DemoListResponse {
    pub requests: Vec<DemoRequestResponse>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

fn to_response(request: DemoRequest) -> DemoRequestResponse {
    DemoRequestResponse {
        id: request.id.map(|id| id.to_hex()).unwrap_or_default(),
        name: request.name,
        email: request.email,
        phone: request.phone,
        company: request.company,
        message: request.message,
        status: format!("{:?}", request.status).to_lowercase(),
        notes: request.notes,
        contacted_by: request.contacted_by.map(|id| id.to_hex()),
        scheduled_date: request.scheduled_date.map(fmt_datetime),
        created_at: fmt_datetime(request.created_at),
    }
}

/// Anonymous intake from the public site. The only unauthenticated write
/// path in the system.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitDemoRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_fields(&[
        ("name", body.name.is_some()),
        ("email", body.email.is_some()),
        ("phone", body.phone.is_some()),
        ("company", body.company.is_some()),
    ])?;

    let email = body.email.unwrap_or_default();
    if !email.validate_email() {
        return Err(ApiError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    let name = body.name.unwrap_or_default();
    let company = body.company.unwrap_or_default();

    let request = state
        .demo_requests
        .create(
            name.clone(),
            email,
            body.phone.unwrap_or_default(),
            company.clone(),
            body.message,
        )
        .await?;

    let id = request.id.map(|id| id.to_hex()).unwrap_or_default();

    // Every admin in the system gets one inbox entry. Best-effort: a
    // notification failure does not fail the intake.
    state
        .notifier
        .notify_role(
            UserRole::Admin,
            NotificationKind::Info,
            "New Demo Request",
            format!("{name} from {company} requested a demo"),
            Some(format!("/admin/demo-requests/{id}")),
        )
        .await;

    Ok(Json(serde_json::json!({
        "message": "Demo request submitted successfully",
        "success": true,
        "id": id,
    })))
}

/// Global triage queue. Visible to every admin regardless of
/// organization.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<DemoListResponse>, ApiError> {
    auth.require_role(&[UserRole::Admin])?;

    let result = state
        .demo_requests
        .list(query.status, &PaginationParams::new(query.page, query.limit))
        .await?;

    Ok(Json(DemoListResponse {
        requests: result.items.into_iter().map(to_response).collect(),
        total: result.total,
        page: result.page,
        total_pages: result.total_pages,
    }))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DemoRequestResponse>, ApiError> {
    auth.require_role(&[UserRole::Admin])?;

    let id = parse_object_id(&id, "demo request id")?;
    let request = state.demo_requests.base.find_by_id(id).await?;
    Ok(Json(to_response(request)))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<TriageRequest>,
) -> Result<Json<DemoRequestResponse>, ApiError> {
    auth.require_role(&[UserRole::Admin])?;

    let id = parse_object_id(&id, "demo request id")?;
    let scheduled_date = body
        .scheduled_date
        .as_deref()
        .map(|d| parse_datetime(d, "scheduled_date"))
        .transpose()?;

    let request = state
        .demo_requests
        .update(id, auth.user_id, body.status, body.notes, scheduled_date)
        .await?;

    Ok(Json(to_response(request)))
}
