use axum::{
    Json,
    extract::{Query, State},
};
use prisbo_db::models::{Activity, ActivityCategory};
use serde::{Deserialize, Serialize};

use super::fmt_datetime;
use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

const DEFAULT_FEED_LIMIT: u64 = 20;
const MAX_FEED_LIMIT: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub category: Option<ActivityCategory>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub id: String,
    pub category: String,
    pub action: String,
    pub description: String,
    pub user_id: String,
    pub related_id: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub activities: Vec<ActivityResponse>,
}

fn to_response(activity: Activity) -> ActivityResponse {
    ActivityResponse {
        id: activity.id.map(|id| id.to_hex()).unwrap_or_default(),
        category: format!("{:?}", activity.category).to_lowercase(),
        action: activity.action,
        description: activity.description,
        user_id: activity.user_id.to_hex(),
        related_id: activity.related_id.map(|id| id.to_hex()),
        created_at: fmt_datetime(activity.created_at),
    }
}

/// Recent audit feed for the active organization, newest first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_FEED_LIMIT)
        .clamp(1, MAX_FEED_LIMIT);

    let activities = state
        .activities
        .list_recent(auth.scope(), query.category, limit)
        .await?;

    Ok(Json(FeedResponse {
        activities: activities.into_iter().map(to_response).collect(),
    }))
}
