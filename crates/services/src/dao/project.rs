use bson::{DateTime, Document, doc, oid::ObjectId};
use mongodb::Database;
use prisbo_db::models::{Project, WorkStatus};

use super::base::{BaseDao, DaoResult, PaginatedResult, PaginationParams};
use crate::tenant::TenantScope;

pub struct ProjectDao {
    pub base: BaseDao<Project>,
}

impl ProjectDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Project::COLLECTION),
        }
    }

    /// The caller must have verified that `customer_id` belongs to the
    /// same scope before inserting.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        scope: TenantScope,
        created_by: ObjectId,
        name: String,
        description: Option<String>,
        customer_id: ObjectId,
        status: WorkStatus,
        due_date: DateTime,
        assigned_to: Option<ObjectId>,
    ) -> DaoResult<Project> {
        let now = DateTime::now();
        let project = Project {
            id: None,
            name,
            description,
            customer_id,
            status,
            due_date,
            assigned_to,
            created_by,
            organization_id: scope.organization_id(),
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&project).await?;
        self.base.find_by_id_scoped(scope, id).await
    }

    pub async fn list(
        &self,
        scope: TenantScope,
        status: Option<WorkStatus>,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<Project>> {
        let mut filter = Document::new();
        if let Some(status) = status {
            filter.insert("status", bson::to_bson(&status)?);
        }

        self.base
            .find_paginated(scope, filter, Some(doc! { "created_at": -1 }), params)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        scope: TenantScope,
        id: ObjectId,
        name: Option<String>,
        description: Option<String>,
        status: Option<WorkStatus>,
        due_date: Option<DateTime>,
        assigned_to: Option<ObjectId>,
    ) -> DaoResult<Project> {
        let mut set = Document::new();
        if let Some(name) = name {
            set.insert("name", name);
        }
        if let Some(description) = description {
            set.insert("description", description);
        }
        if let Some(status) = status {
            set.insert("status", bson::to_bson(&status)?);
        }
        if let Some(due_date) = due_date {
            set.insert("due_date", due_date);
        }
        if let Some(assigned_to) = assigned_to {
            set.insert("assigned_to", assigned_to);
        }

        self.base.update_by_id_scoped(scope, id, set).await
    }

    pub async fn count_by_status(&self, scope: TenantScope, status: WorkStatus) -> DaoResult<u64> {
        self.base
            .count_scoped(scope, doc! { "status": bson::to_bson(&status)? })
            .await
    }
}
