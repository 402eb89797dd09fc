use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use bson::oid::ObjectId;
use prisbo_db::models::UserRole;
use prisbo_services::TenantScope;
use prisbo_services::auth::Claims;

use crate::{error::ApiError, state::AppState};

/// The authenticated session, extracted from the JWT (cookie or
/// Authorization header). Claims are trusted as-is for the lifetime of
/// the token; role and organization are not re-read from the database.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: ObjectId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub organization_id: ObjectId,
    pub current_organization_id: Option<ObjectId>,
    pub claims: Claims,
}

impl AuthUser {
    /// The active organization for every tenant-scoped query this
    /// request makes.
    pub fn scope(&self) -> TenantScope {
        TenantScope::from_session(self.organization_id, self.current_organization_id)
    }

    /// Flat role check. Each call site declares its own allowed set.
    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Not authorized".to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Try Authorization header first
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|s| s.to_string())
            // Then try cookie
            .or_else(|| {
                parts
                    .headers
                    .get(header::COOKIE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|cookies| {
                        cookies.split(';').find_map(|cookie| {
                            let cookie = cookie.trim();
                            cookie.strip_prefix("access_token=").map(|s| s.to_string())
                        })
                    })
            })
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

        let claims = app_state.auth.verify_access_token(&token)?;

        let user_id = claims.user_id()?;
        let organization_id = claims.organization_id()?;
        let current_organization_id = claims.current_organization_id()?;

        Ok(AuthUser {
            user_id,
            email: claims.email.clone(),
            name: claims.name.clone(),
            role: claims.role,
            organization_id,
            current_organization_id,
            claims,
        })
    }
}

/// Helper trait for extracting AppState from composite state types
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AppState> for AppState {
    fn from_ref(input: &AppState) -> Self {
        input.clone()
    }
}
