use bson::oid::ObjectId;
use mongodb::Database;
use prisbo_db::models::{NotificationKind, UserRole};
use tracing::warn;

use crate::dao::notification::NotificationDao;
use crate::dao::user::UserDao;

/// Best-effort inbox writer. Same failure policy as the activity log:
/// errors are logged at this boundary and never propagated.
pub struct Notifier {
    notifications: NotificationDao,
    users: UserDao,
}

impl Notifier {
    pub fn new(db: &Database) -> Self {
        Self {
            notifications: NotificationDao::new(db),
            users: UserDao::new(db),
        }
    }

    /// Create one inbox entry. When `organization_id` is not supplied it
    /// is resolved from the recipient's home organization; a recipient
    /// that cannot be resolved makes the call a logged no-op.
    pub async fn notify(
        &self,
        user_id: ObjectId,
        kind: NotificationKind,
        title: &str,
        message: String,
        link: Option<String>,
        organization_id: Option<ObjectId>,
    ) {
        let org_id = match organization_id {
            Some(org_id) => org_id,
            None => match self.users.base.find_by_id(user_id).await {
                Ok(user) => user.organization_id,
                Err(e) => {
                    warn!(error = %e, %user_id, "No organization resolvable for notification");
                    return;
                }
            },
        };

        let notification =
            NotificationDao::build(user_id, kind, title.to_string(), message, link, org_id);

        if let Err(e) = self.notifications.base.insert_one(&notification).await {
            warn!(error = %e, %user_id, "Failed to create notification");
        }
    }

    /// Fan out one notification per user holding `role`, system-wide.
    /// Each entry lands in the recipient's home organization; users
    /// without one never deserialize, so they are filtered out upstream.
    pub async fn notify_role(
        &self,
        role: UserRole,
        kind: NotificationKind,
        title: &str,
        message: String,
        link: Option<String>,
    ) {
        let role_bson = match bson::to_bson(&role) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Failed to encode role filter");
                return;
            }
        };

        let users = match self
            .users
            .base
            .find_many(bson::doc! { "role": role_bson }, None)
            .await
        {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, ?role, "Failed to resolve notification recipients");
                return;
            }
        };

        let notifications: Vec<_> = users
            .into_iter()
            .filter_map(|user| {
                let user_id = user.id?;
                Some(NotificationDao::build(
                    user_id,
                    kind,
                    title.to_string(),
                    message.clone(),
                    link.clone(),
                    user.organization_id,
                ))
            })
            .collect();

        if notifications.is_empty() {
            return;
        }

        if let Err(e) = self.notifications.base.insert_many(&notifications).await {
            warn!(error = %e, ?role, "Failed to fan out notifications");
        }
    }
}
