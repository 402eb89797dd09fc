use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: CustomerStatus,
    pub notes: Option<String>,
    pub created_by: ObjectId,
    /// Set at creation, never changes.
    pub organization_id: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
}

impl Customer {
    pub const COLLECTION: &'static str = "customers";
}
