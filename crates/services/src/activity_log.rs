use bson::oid::ObjectId;
use mongodb::Database;
use prisbo_db::models::ActivityCategory;
use tracing::warn;

use crate::dao::activity::ActivityDao;
use crate::tenant::TenantScope;

/// Best-effort audit trail. A failed append must never fail the mutation
/// that triggered it, so every error stops here.
pub struct ActivityLogger {
    dao: ActivityDao,
}

impl ActivityLogger {
    pub fn new(db: &Database) -> Self {
        Self {
            dao: ActivityDao::new(db),
        }
    }

    pub async fn log(
        &self,
        scope: TenantScope,
        category: ActivityCategory,
        action: &str,
        description: String,
        user_id: ObjectId,
        related_id: Option<ObjectId>,
    ) {
        if let Err(e) = self
            .dao
            .append(
                scope,
                category,
                action.to_string(),
                description,
                user_id,
                related_id,
            )
            .await
        {
            warn!(error = %e, action, "Failed to record activity");
        }
    }
}
