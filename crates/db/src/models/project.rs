use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: Option<String>,
    /// Must belong to the same organization as the project.
    pub customer_id: ObjectId,
    #[serde(default)]
    pub status: WorkStatus,
    pub due_date: DateTime,
    pub assigned_to: Option<ObjectId>,
    pub created_by: ObjectId,
    pub organization_id: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Shared by projects and tasks. Transitions are not enforced: any value
/// may be written directly, matching the permissive update path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl Project {
    pub const COLLECTION: &'static str = "projects";
}
