use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Per-user inbox entry, read via polling. The only mutation after insert
/// is flipping the read flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    #[serde(default)]
    pub read: bool,
    pub organization_id: ObjectId,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub const COLLECTION: &'static str = "notifications";
}
