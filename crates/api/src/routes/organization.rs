use axum::{Json, extract::State, http::StatusCode};
use prisbo_db::models::{NotificationKind, OrgStatus, Organization, Plan, UserRole};
use serde::{Deserialize, Serialize};

use super::{fmt_datetime, parse_object_id, require_fields};
use crate::{
    error::ApiError,
    extractors::auth::AuthUser,
    routes::auth::{AuthResponse, session_cookie, user_summary},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub domain: Option<String>,
    #[serde(default)]
    pub plan: Option<Plan>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub owner_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SwitchRequest {
    pub organization_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub email: String,
    pub phone: Option<String>,
    pub domain: Option<String>,
    pub plan: String,
    pub status: String,
    pub billing_email: Option<String>,
    pub max_users: u32,
    pub max_projects: u32,
    pub owner_id: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct CreateOrganizationResponse {
    pub organization: OrganizationResponse,
    pub owner: crate::routes::auth::UserSummary,
}

fn to_response(org: Organization) -> OrganizationResponse {
    OrganizationResponse {
        id: org.id.map(|id| id.to_hex()).unwrap_or_default(),
        name: org.name,
        slug: org.slug,
        email: org.email,
        phone: org.phone,
        domain: org.domain,
        plan: format!("{:?}", org.plan).to_lowercase(),
        status: format!("{:?}", org.status).to_lowercase(),
        billing_email: org.billing_email,
        max_users: org.max_users,
        max_projects: org.max_projects,
        owner_id: org.owner_id.map(|id| id.to_hex()),
        created_at: fmt_datetime(org.created_at),
    }
}

/// Organization signup: three separate writes (organization, owner user,
/// owner-reference patch) with no rollback if a later step fails.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<CreateOrganizationResponse>), ApiError> {
    require_fields(&[
        ("name", body.name.is_some()),
        ("email", body.email.is_some()),
        ("owner_name", body.owner_name.is_some()),
        ("owner_email", body.owner_email.is_some()),
        ("owner_password", body.owner_password.is_some()),
    ])?;
    let name = body.name.unwrap_or_default();
    let email = body.email.unwrap_or_default();
    let owner_name = body.owner_name.unwrap_or_default();
    let owner_email = body.owner_email.unwrap_or_default();
    let owner_password = body.owner_password.unwrap_or_default();

    if owner_password.len() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    // Owner email is checked globally: one account per email across the
    // whole system at signup, unlike team-member creation which is
    // per-organization.
    if state.users.find_by_email(&owner_email).await.is_ok() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let slug = state.organizations.unique_slug(&name).await?;
    let plan = body.plan.unwrap_or_default();

    let org = state
        .organizations
        .create(name.clone(), slug, email, body.phone, body.domain, plan)
        .await?;
    let org_id = org.id.ok_or_else(|| {
        ApiError::Internal("Organization inserted without an id".to_string())
    })?;

    let password_hash = state.auth.hash_password(&owner_password)?;
    let owner = state
        .users
        .create(
            owner_name,
            owner_email,
            password_hash,
            UserRole::Admin,
            org_id,
        )
        .await?;
    let owner_id = owner
        .id
        .ok_or_else(|| ApiError::Internal("Owner inserted without an id".to_string()))?;

    state.organizations.set_owner(org_id, owner_id).await?;

    state
        .notifier
        .notify(
            owner_id,
            NotificationKind::Success,
            "Welcome to Prisbo!",
            format!(
                "Your organization \"{name}\" has been created. You can now start managing your business."
            ),
            Some("/dashboard".to_string()),
            Some(org_id),
        )
        .await;

    let org = state.organizations.base.find_by_id(org_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrganizationResponse {
            organization: to_response(org),
            owner: user_summary(&owner),
        }),
    ))
}

/// The active organization for the session.
pub async fn get_current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<OrganizationResponse>, ApiError> {
    let org = state
        .organizations
        .base
        .find_by_id(auth.scope().organization_id())
        .await?;
    Ok(Json(to_response(org)))
}

/// Switch the session to another organization. Restricted to the user's
/// home organization until multi-org membership exists; the response
/// carries a fresh token pair so the new scope takes effect immediately.
pub async fn switch(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SwitchRequest>,
) -> Result<(axum::http::HeaderMap, Json<AuthResponse>), ApiError> {
    let org_id = body
        .organization_id
        .as_deref()
        .ok_or_else(|| ApiError::Validation("Missing required fields: organization_id".to_string()))?;
    let org_id = parse_object_id(org_id, "organization_id")?;

    let user = state.users.base.find_by_id(auth.user_id).await?;

    if user.organization_id != org_id {
        return Err(ApiError::Forbidden(
            "You do not have access to this organization".to_string(),
        ));
    }

    let org = state.organizations.base.find_by_id(org_id).await?;
    if org.status != OrgStatus::Active {
        return Err(ApiError::Forbidden(
            "Organization is not active".to_string(),
        ));
    }

    state
        .users
        .set_current_organization(auth.user_id, org_id)
        .await?;

    let user = state.users.base.find_by_id(auth.user_id).await?;
    let tokens = state.auth.generate_tokens(&user)?;
    let headers = session_cookie(&tokens.access_token, tokens.expires_in);

    Ok((
        headers,
        Json(AuthResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            user: user_summary(&user),
        }),
    ))
}
