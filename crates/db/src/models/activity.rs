use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Append-only audit entry. Never updated or deleted by normal flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub category: ActivityCategory,
    pub action: String,
    pub description: String,
    pub user_id: ObjectId,
    pub related_id: Option<ObjectId>,
    pub organization_id: ObjectId,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Customer,
    Project,
    Team,
}

impl Activity {
    pub const COLLECTION: &'static str = "activities";
}
