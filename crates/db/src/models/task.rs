use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::project::WorkStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: Option<String>,
    /// Must belong to the same organization as the task.
    pub project_id: ObjectId,
    #[serde(default)]
    pub status: WorkStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    pub due_date: Option<DateTime>,
    pub assigned_to: Option<ObjectId>,
    pub created_by: ObjectId,
    pub organization_id: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl Task {
    pub const COLLECTION: &'static str = "tasks";
}
