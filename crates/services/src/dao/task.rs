use bson::{DateTime, Document, doc, oid::ObjectId};
use mongodb::Database;
use prisbo_db::models::{Task, TaskPriority, WorkStatus};

use super::base::{BaseDao, DaoResult};
use crate::tenant::TenantScope;

pub struct TaskDao {
    pub base: BaseDao<Task>,
}

impl TaskDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Task::COLLECTION),
        }
    }

    /// The caller must have verified that `project_id` belongs to the
    /// same scope before inserting.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        scope: TenantScope,
        created_by: ObjectId,
        title: String,
        description: Option<String>,
        project_id: ObjectId,
        status: WorkStatus,
        priority: TaskPriority,
        due_date: Option<DateTime>,
        assigned_to: Option<ObjectId>,
    ) -> DaoResult<Task> {
        let now = DateTime::now();
        let task = Task {
            id: None,
            title,
            description,
            project_id,
            status,
            priority,
            due_date,
            assigned_to,
            created_by,
            organization_id: scope.organization_id(),
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&task).await?;
        self.base.find_by_id_scoped(scope, id).await
    }

    pub async fn list(
        &self,
        scope: TenantScope,
        project_id: Option<ObjectId>,
        assigned_to: Option<ObjectId>,
        status: Option<WorkStatus>,
    ) -> DaoResult<Vec<Task>> {
        let mut filter = Document::new();
        if let Some(project_id) = project_id {
            filter.insert("project_id", project_id);
        }
        if let Some(assigned_to) = assigned_to {
            filter.insert("assigned_to", assigned_to);
        }
        if let Some(status) = status {
            filter.insert("status", bson::to_bson(&status)?);
        }

        self.base
            .find_many_scoped(scope, filter, Some(doc! { "created_at": -1 }))
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        scope: TenantScope,
        id: ObjectId,
        title: Option<String>,
        description: Option<String>,
        status: Option<WorkStatus>,
        priority: Option<TaskPriority>,
        due_date: Option<DateTime>,
        assigned_to: Option<ObjectId>,
    ) -> DaoResult<Task> {
        let mut set = Document::new();
        if let Some(title) = title {
            set.insert("title", title);
        }
        if let Some(description) = description {
            set.insert("description", description);
        }
        if let Some(status) = status {
            set.insert("status", bson::to_bson(&status)?);
        }
        if let Some(priority) = priority {
            set.insert("priority", bson::to_bson(&priority)?);
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
