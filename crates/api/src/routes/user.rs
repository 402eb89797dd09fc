use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bson::Document;
use prisbo_db::models::{ActivityCategory, NotificationKind, User, UserRole};
use serde::{Deserialize, Serialize};

use super::{parse_object_id, require_fields};
use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub users: Vec<MemberResponse>,
}

fn to_response(user: User) -> MemberResponse {
    MemberResponse {
        id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        name: user.name,
        email: user.email,
        role: format!("{:?}", user.role).to_lowercase(),
    }
}

/// Team roster for the active organization. Visible to every member.
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MemberListResponse>, ApiError> {
    let users = state.users.list_members(auth.scope()).await?;
    Ok(Json(MemberListResponse {
        users: users.into_iter().map(to_response).collect(),
    }))
}

pub async fn admin_create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    auth.require_role(&[UserRole::Admin])?;

    require_fields(&[
        ("name", body.name.is_some()),
        ("email", body.email.is_some()),
        ("password", body.password.is_some()),
        ("role", body.role.is_some()),
    ])?;

    let password = body.password.unwrap_or_default();
    if password.len() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let email = body.email.unwrap_or_default();

    // Uniqueness is scoped: the same address may exist under another
    // organization. Only the signup path checks globally.
    if state
        .users
        .find_by_email_in_org(auth.scope(), &email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "User with this email already exists in your organization".to_string(),
        ));
    }

    let password_hash = state.auth.hash_password(&password)?;
    let name = body.name.unwrap_or_default();
    let user = state
        .users
        .create(
            name.clone(),
            email,
            password_hash,
            body.role.unwrap_or_default(),
            auth.scope().organization_id(),
        )
        .await?;

    if let Some(user_id) = user.id {
        state
            .notifier
            .notify(
                user_id,
                NotificationKind::Success,
                "Welcome to Prisbo!",
                "Your account has been created. You can now log in.".to_string(),
                Some("/dashboard".to_string()),
                Some(auth.scope().organization_id()),
            )
            .await;
    }

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Team,
            "Team Member Added",
            format!("Added team member: {name}"),
            auth.user_id,
            user.id,
        )
        .await;

    Ok((StatusCode::CREATED, Json(to_response(user))))
}

pub async fn admin_update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    auth.require_role(&[UserRole::Admin])?;

    let id = parse_object_id(&id, "user id")?;

    let mut set = Document::new();
    if let Some(name) = body.name {
        set.insert("name", name);
    }
    if let Some(email) = body.email {
        set.insert("email", email.to_lowercase());
    }
    if let Some(role) = body.role {
        set.insert("role", bson::to_bson(&role).map_err(|e| ApiError::Internal(e.to_string()))?);
    }
    if let Some(password) = body.password {
        if password.len() < 6 {
            return Err(ApiError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        set.insert("password_hash", state.auth.hash_password(&password)?);
    }

    let user = state.users.update_member(auth.scope(), id, set).await?;
    Ok(Json(to_response(user)))
}

pub async fn admin_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require_role(&[UserRole::Admin])?;

    let id = parse_object_id(&id, "user id")?;

    // Self-protection: admins cannot remove their own account.
    if id == auth.user_id {
        return Err(ApiError::Forbidden(
            "You cannot delete your own account".to_string(),
        ));
    }

    let user = state.users.delete_member(auth.scope(), id).await?;

    state
        .activity_log
        .log(
            auth.scope(),
            ActivityCategory::Team,
            "Team Member Removed",
            format!("Removed team member: {}", user.name),
            auth.user_id,
            user.id,
        )
        .await;

    Ok(Json(
        serde_json::json!({ "message": "User deleted successfully" }),
    ))
}
