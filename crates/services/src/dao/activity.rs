use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use prisbo_db::models::{Activity, ActivityCategory};

use super::base::{BaseDao, DaoResult};
use crate::tenant::TenantScope;

pub struct ActivityDao {
    pub base: BaseDao<Activity>,
}

impl ActivityDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Activity::COLLECTION),
        }
    }

    pub async fn append(
        &self,
        scope: TenantScope,
        category: ActivityCategory,
        action: String,
        description: String,
        user_id: ObjectId,
        related_id: Option<ObjectId>,
    ) -> DaoResult<ObjectId> {
        let activity = Activity {
            id: None,
            category,
            action,
            description,
            user_id,
            related_id,
            organization_id: scope.organization_id(),
            created_at: DateTime::now(),
        };

        self.base.insert_one(&activity).await
    }

    pub async fn list_recent(
        &self,
        scope: TenantScope,
        category: Option<ActivityCategory>,
        limit: u64,
    ) -> DaoResult<Vec<Activity>> {
        let mut filter = doc! { "organization_id": scope.organization_id() };
        if let Some(category) = category {
            filter.insert("category", bson::to_bson(&category)?);
        }

        let mut cursor = self
            .base
            .collection()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .limit(limit as i64)
            .await?;

        let mut items = Vec::new();
        use futures::TryStreamExt;
        while let Some(doc) = cursor.try_next().await? {
            items.push(doc);
        }
        Ok(items)
    }
}
