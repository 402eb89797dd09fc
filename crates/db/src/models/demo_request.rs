use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Public intake form submission. Created anonymously, without an
/// organization, and triaged globally by admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: Option<String>,
    #[serde(default)]
    pub status: DemoStatus,
    pub notes: Option<String>,
    /// Stamped with the acting admin when status moves to contacted or
    /// scheduled.
    pub contacted_by: Option<ObjectId>,
    pub scheduled_date: Option<DateTime>,
    pub organization_id: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DemoStatus {
    #[default]
    Pending,
    Contacted,
    Scheduled,
    Completed,
    Cancelled,
}

impl DemoStatus {
    /// The intended triage flow. The update path does not enforce it:
    /// admins may set any status directly, matching the permissive
    /// behavior documented in DESIGN.md.
    pub fn can_transition_to(&self, next: DemoStatus) -> bool {
        use DemoStatus::*;
        match (self, next) {
            (Pending, Contacted) | (Pending, Cancelled) => true,
            (Contacted, Scheduled) | (Contacted, Cancelled) => true,
            (Scheduled, Completed) | (Scheduled, Cancelled) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DemoStatus::Completed | DemoStatus::Cancelled)
    }
}

impl DemoRequest {
    pub const COLLECTION: &'static str = "demo_requests";
}
