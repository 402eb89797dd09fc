use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use prisbo_db::models::{ActivityCategory, Task, TaskPriority, WorkStatus};
use serde::{Deserialize, Serialize};

use super::{fmt_datetime, parse_datetime, parse_object_id, require_fields};
use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub status: Option<WorkStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<WorkStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub project_id: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<WorkStatus>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub project_id: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
    pub assigned_to: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
}

fn to_response(task: Task) -> TaskResponse {
    TaskResponse {
        id: task.id.map(|id| id.to_hex()).unwrap_or_default(),
        title: task.title,
        description: task.description,
        project_id: task.project_id.to_hex(),
        status: match task.status {
            WorkStatus::Pending => "pending",
            WorkStatus::InProgress => "in-progress",
            WorkStatus::Completed => "completed",
        }
        .to_string(),
        priority: format!("{:?}", task.priority).to_lowercase(),
        due_date: task.due_date.map(fmt_datetime),
        assigned_to: task.assigned_to.map(|id| id.to_hex()),
        created_by: task.created_by.to_hex(),
        created_at: fmt_datetime(task.created_at),
    }
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    require_fields(&[
        ("title", body.title.is_some()),
        ("project_id", body.project_id.is_some()),
    ])?;

    let project_id = parse_object_id(&body.project_id.unwrap_or_default(), "project_id")?;
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

    // Same-organization parent check, same NotFound merging as projects.
    state
        .projects
        .base
        .find_by_id_scoped(auth.scope(), project_id)
        .await?;

    let title = body.title.unwrap_or_default();
    let task = state
        .tasks
        .create(
            auth.scope(),
            auth.user_id,
            title.clone(),
            body.description,
            project_id,
            body.status.unwrap_or_default(),
            body.priority.unwrap_or_default(),
            due_date,
            assigned_to,
        )
        .await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Project,
            "Task Created",
            format!("Created task: {title}"),
            auth.user_id,
            Some(project_id),
        )
        .await;

    Ok((StatusCode::CREATED, Json(to_response(task))))
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let project_id = query
        .project_id
        .as_deref()
        .map(|id| parse_object_id(id, "project_id"))
        .transpose()?;
    let assigned_to = query
        .assigned_to
        .as_deref()
        .map(|id| parse_object_id(id, "assigned_to"))
        .transpose()?;

    let tasks = state
        .tasks
        .list(auth.scope(), project_id, assigned_to, query.status)
        .await?;

    Ok(Json(TaskListResponse {
        tasks: tasks.into_iter().map(to_response).collect(),
    }))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = parse_object_id(&id, "task id")?;
    let task = state.tasks.base.find_by_id_scoped(auth.scope(), id).await?;
    Ok(Json(to_response(task)))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = parse_object_id(&id, "task id")?;

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

    let task = state
        .tasks
        .update(
            auth.scope(),
            id,
            body.title,
            body.description,
            body.status,
            body.priority,
            due_date,
            assigned_to,
        )
        .await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Project,
            "Task Updated",
            format!("Updated task: {}", task.title),
            auth.user_id,
            Some(task.project_id),
        )
        .await;

    Ok(Json(to_response(task)))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_object_id(&id, "task id")?;

    let task = state.tasks.base.delete_by_id_scoped(auth.scope(), id).await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Project,
            "Task Deleted",
            format!("Deleted task: {}", task.title),
            auth.user_id,
            Some(task.project_id),
        )
        .await;

    Ok(Json(
        serde_json::json!({ "message": "Task deleted successfully" }),
    ))
}
