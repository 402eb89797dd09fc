use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// Stored lowercased; lookups lowercase the input before querying.
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: UserRole,
    /// Home organization. Every user belongs to exactly one.
    pub organization_id: ObjectId,
    /// The organization the user is currently operating in. Falls back to
    /// the home organization when unset.
    pub current_organization_id: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    User,
}

impl User {
    pub const COLLECTION: &'static str = "users";

    /// Active organization for tenant-scoped queries.
    pub fn active_organization_id(&self) -> ObjectId {
        self.current_organization_id.unwrap_or(self.organization_id)
    }
}
