use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
};
use prisbo_db::models::User;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub organization_id: String,
    pub current_organization_id: String,
}

pub fn user_summary(user: &User) -> UserSummary {
    UserSummary {
        id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: format!("{:?}", user.role).to_lowercase(),
        organization_id: user.organization_id.to_hex(),
        current_organization_id: user.active_organization_id().to_hex(),
    }
}

pub fn session_cookie(token: &str, max_age: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let cookie = format!(
        "access_token={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        token, max_age
    );
    if let Ok(value) = cookie.parse() {
        headers.insert(header::SET_COOKIE, value);
    }
    headers
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), ApiError> {
    // Unknown email and wrong password produce the same response, so the
    // endpoint cannot be used for user enumeration.
    let user = state
        .users
        .find_by_email(&body.email)
        .await
        .map_err(|_| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = state
        .auth
        .verify_password(&body.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

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

pub async fn logout() -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    let cookie = "access_token=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0";
    if let Ok(value) = cookie.parse() {
        headers.insert(header::SET_COOKIE, value);
    }
    Ok(headers)
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserSummary>, ApiError> {
    let user = state.users.base.find_by_id(auth.user_id).await?;
    Ok(Json(user_summary(&user)))
}

/// Token reissue is where role and organization changes actually take
/// effect: claims are rebuilt from the current user document.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), ApiError> {
    let claims = state.auth.verify_refresh_token(&body.refresh_token)?;
    let user_id = claims.user_id()?;

    let user = state.users.base.find_by_id(user_id).await?;
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
