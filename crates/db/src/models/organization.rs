use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub slug: String,
    pub email: String,
    pub phone: Option<String>,
    pub domain: Option<String>,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub status: OrgStatus,
    pub subscription_id: Option<String>,
    pub billing_email: Option<String>,
    pub max_users: u32,
    pub max_projects: u32,
    /// Unset only between the organization insert and the owner-reference
    /// patch during signup.
    pub owner_id: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Free,
    Starter,
    Professional,
    Enterprise,
}

impl Plan {
    /// Seat limit stamped on the organization at signup. Display-only.
    pub fn max_users(&self) -> u32 {
        match self {
            Plan::Free => 5,
            Plan::Starter => 10,
            Plan::Professional => 50,
            Plan::Enterprise => 999,
        }
    }

    pub fn max_projects(&self) -> u32 {
        match self {
            Plan::Free => 10,
            Plan::Starter => 50,
            Plan::Professional => 200,
            Plan::Enterprise => 9999,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OrgStatus {
    #[default]
    Active,
    Suspended,
    Cancelled,
}

impl Organization {
    pub const COLLECTION: &'static str = "organizations";
}
