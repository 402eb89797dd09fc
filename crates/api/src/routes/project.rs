use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use prisbo_db::models::{ActivityCategory, Project, WorkStatus};
use prisbo_services::dao::base::PaginationParams;
use serde::{Deserialize, Serialize};

use super::{fmt_datetime, parse_datetime, parse_object_id, require_fields};
use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub customer_id: Option<String>,
    pub status: Option<WorkStatus>,
    pub due_date: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<WorkStatus>,
    pub due_date: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<WorkStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub customer_id: String,
    pub status: String,
    pub due_date: String,
    pub assigned_to: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectResponse>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

fn status_label(status: WorkStatus) -> String {
    match status {
        WorkStatus::Pending => "pending",
        WorkStatus::InProgress => "in-progress",
        WorkStatus::Completed => "completed",
    }
    .to_string()
}

fn to_response(project: Project) -> ProjectResponse {
    ProjectResponse {
        id: project.id.map(|id| id.to_hex()).unwrap_or_default(),
        name: project.name,
        description: project.description,
        customer_id: project.customer_id.to_hex(),
        status: status_label(project.status),
        due_date: fmt_datetime(project.due_date),
        assigned_to: project.assigned_to.map(|id| id.to_hex()),
        created_by: project.created_by.to_hex(),
        created_at: fmt_datetime(project.created_at),
    }
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    require_fields(&[
        ("name", body.name.is_some()),
        ("customer_id", body.customer_id.is_some()),
        ("status", body.status.is_some()),
        ("due_date", body.due_date.is_some()),
    ])?;

    let customer_id = parse_object_id(&body.customer_id.unwrap_or_default(), "customer_id")?;
    let due_date = parse_datetime(&body.due_date.unwrap_or_default(), "due_date")?;
    let assigned_to = body
        .assigned_to
        .as_deref()
        .map(|id| parse_object_id(id, "assigned_to"))
        .transpose()?;

    // The parent must exist in the active organization. A foreign
    // customer reads as NotFound, never Forbidden, so nothing about its
    // existence leaks across tenants.
    state
        .customers
        .base
        .find_by_id_scoped(auth.scope(), customer_id)
        .await?;

    let name = body.name.unwrap_or_default();
    let project = state
        .projects
        .create(
            auth.scope(),
            auth.user_id,
            name.clone(),
            body.description,
            customer_id,
            body.status.unwrap_or_default(),
            due_date,
            assigned_to,
        )
        .await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Project,
            "Project Created",
            format!("Created project: {name}"),
            auth.user_id,
            project.id,
        )
        .await;

    Ok((StatusCode::CREATED, Json(to_response(project))))
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let result = state
        .projects
        .list(
            auth.scope(),
            query.status,
            &PaginationParams::new(query.page, query.limit),
        )
        .await?;

    Ok(Json(ProjectListResponse {
        projects: result.items.into_iter().map(to_response).collect(),
        total: result.total,
        page: result.page,
        total_pages: result.total_pages,
    }))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let id = parse_object_id(&id, "project id")?;
    let project = state.projects.base.find_by_id_scoped(auth.scope(), id).await?;
    Ok(Json(to_response(project)))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let id = parse_object_id(&id, "project id")?;

    let due_date = body
        .due_date
        .as_deref()
        .map(|d| parse_datetime(d, "due_date"))
        .transpose()?;
    let assigned_to = body
        .assigned_to
        .as_deref()
        .map(|a| parse_object_id(a, "assigned_to"))
        .transpose()?;

    let project = state
        .projects
        .update(
            auth.scope(),
            id,
            body.name,
            body.description,
            body.status,
            due_date,
            assigned_to,
        )
        .await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Project,
            "Project Updated",
            format!("Updated project: {}", project.name),
            auth.user_id,
            project.id,
        )
        .await;

    Ok(Json(to_response(project)))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_object_id(&id, "project id")?;

    let project = state.projects.base.delete_by_id_scoped(auth.scope(), id).await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Project,
            "Project Deleted",
            format!("Deleted project: {}", project.name),
            auth.user_id,
            project.id,
        )
        .await;

    Ok(Json(
        serde_json::json!({ "message": "Project deleted successfully" }),
    ))
}
