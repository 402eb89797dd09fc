use axum::{Json, extract::State};
use bson::doc;
use prisbo_db::models::{CustomerStatus, UserRole, WorkStatus};
use serde::Serialize;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct StatusBreakdown {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct CustomerBreakdown {
    pub new: u64,
    pub contacted: u64,
    pub qualified: u64,
    pub converted: u64,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub customers: CustomerBreakdown,
    pub projects: StatusBreakdown,
    pub tasks: StatusBreakdown,
    pub team_size: u64,
}

/// Per-status counts for the active organization. Managers and admins
/// only.
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    auth.require_role(&[UserRole::Admin, UserRole::Manager])?;

    let scope = auth.scope();

    let customer_count = |status: CustomerStatus| {
        let customers = state.customers.clone();
        async move {
            customers
                .base
                .count_scoped(scope, doc! { "status": bson::to_bson(&status)? })
                .await
        }
    };

    let customers = CustomerBreakdown {
        new: customer_count(CustomerStatus::New).await?,
        contacted: customer_count(CustomerStatus::Contacted).await?,
        qualified: customer_count(CustomerStatus::Qualified).await?,
        converted: customer_count(CustomerStatus::Converted).await?,
        total: state.customers.base.count_scoped(scope, doc! {}).await?,
    };

    let projects = StatusBreakdown {
        pending: state
            .projects
            .count_by_status(scope, WorkStatus::Pending)
            .await?,
        in_progress: state
            .projects
            .count_by_status(scope, WorkStatus::InProgress)
            .await?,
        completed: state
            .projects
            .count_by_status(scope, WorkStatus::Completed)
            .await?,
        total: state.projects.base.count_scoped(scope, doc! {}).await?,
    };

    let tasks = StatusBreakdown {
        pending: state
            .tasks
            .count_by_status(scope, WorkStatus::Pending)
            .await?,
        in_progress: state
            .tasks
            .count_by_status(scope, WorkStatus::InProgress)
            .await?,
        completed: state
            .tasks
            .count_by_status(scope, WorkStatus::Completed)
            .await?,
        total: state.tasks.base.count_scoped(scope, doc! {}).await?,
    };

    let team_size = state.users.base.count_scoped(scope, doc! {}).await?;

    Ok(Json(AnalyticsResponse {
        customers,
        projects,
        tasks,
        team_size,
    }))
}
