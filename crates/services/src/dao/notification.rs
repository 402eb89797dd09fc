use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use prisbo_db::models::{Notification, NotificationKind};

use super::base::{BaseDao, DaoError, DaoResult};
use crate::tenant::TenantScope;

/// How many inbox entries the polling endpoint returns at most.
pub const INBOX_LIMIT: i64 = 50;

pub struct NotificationDao {
    pub base: BaseDao<Notification>,
}

impl NotificationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Notification::COLLECTION),
        }
    }

    pub fn build(
        user_id: ObjectId,
        kind: NotificationKind,
        title: String,
        message: String,
        link: Option<String>,
        organization_id: ObjectId,
    ) -> Notification {
        Notification {
            id: None,
            user_id,
            kind,
            title,
            message,
            link,
            read: false,
            organization_id,
            created_at: DateTime::now(),
        }
    }

    pub async fn list_for_user(
        &self,
        scope: TenantScope,
        user_id: ObjectId,
    ) -> DaoResult<Vec<Notification>> {
        let filter = doc! {
            "user_id": user_id,
            "organization_id": scope.organization_id(),
        };

        let mut cursor = self
            .base
            .collection()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .limit(INBOX_LIMIT)
            .await?;

        let mut items = Vec::new();
        use futures::TryStreamExt;
        while let Some(doc) = cursor.try_next().await? {
            items.push(doc);
        }
        Ok(items)
    }

    pub async fn unread_count(&self, scope: TenantScope, user_id: ObjectId) -> DaoResult<u64> {
        self.base
            .count_scoped(scope, doc! { "user_id": user_id, "read": false })
            .await
    }

    /// Flip the read flag. Scoped to the owner and the active
    /// organization, so another user's notification reads as missing.
    pub async fn set_read(
        &self,
        scope: TenantScope,
        user_id: ObjectId,
        id: ObjectId,
        read: bool,
    ) -> DaoResult<Notification> {
        self.base
            .collection()
            .find_one_and_update(
                doc! {
                    "_id": id,
                    "user_id": user_id,
                    "organization_id": scope.organization_id(),
                },
                doc! { "$set": { "read": read } },
            )
            .return_document(mongodb::options::ReturnDocument::After)
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn mark_all_read(&self, scope: TenantScope, user_id: ObjectId) -> DaoResult<u64> {
        self.base
            .update_many(
                doc! {
                    "user_id": user_id,
                    "organization_id": scope.organization_id(),
                    "read": false,
                },
                doc! { "$set": { "read": true } },
            )
            .await
    }
}
