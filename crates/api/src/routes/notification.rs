use axum::{
    Json,
    extract::{Path, State},
};
use prisbo_db::models::Notification;
use serde::{Deserialize, Serialize};

use super::{fmt_datetime, parse_object_id};
use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub read: bool,
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct InboxResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: u64,
}

fn to_response(notification: Notification) -> NotificationResponse {
    NotificationResponse {
        id: notification.id.map(|id| id.to_hex()).unwrap_or_default(),
        kind: format!("{:?}", notification.kind).to_lowercase(),
        title: notification.title,
        message: notification.message,
        link: notification.link,
        read: notification.read,
        created_at: fmt_datetime(notification.created_at),
    }
}

/// Polled inbox: newest entries plus the unread badge count.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<InboxResponse>, ApiError> {
    let notifications = state
        .notifications
        .list_for_user(auth.scope(), auth.user_id)
        .await?;
    let unread_count = state
        .notifications
        .unread_count(auth.scope(), auth.user_id)
        .await?;

    Ok(Json(InboxResponse {
        notifications: notifications.into_iter().map(to_response).collect(),
        unread_count,
    }))
}

pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<MarkReadRequest>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let id = parse_object_id(&id, "notification id")?;

    let notification = state
        .notifications
        .set_read(auth.scope(), auth.user_id, id, body.read)
        .await?;

    Ok(Json(to_response(notification)))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .notifications
        .mark_all_read(auth.scope(), auth.user_id)
        .await?;

    Ok(Json(
        serde_json::json!({ "message": "All notifications marked as read" }),
    ))
}
