use bson::{DateTime, Document, doc, oid::ObjectId};
use mongodb::Database;
use prisbo_db::models::{User, UserRole};

use super::base::{BaseDao, DaoError, DaoResult};
use crate::tenant::TenantScope;

pub struct UserDao {
    pub base: BaseDao<User>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, User::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role: UserRole,
        organization_id: ObjectId,
    ) -> DaoResult<User> {
        let now = DateTime::now();
        let user = User {
            id: None,
            name,
            email: email.to_lowercase(),
            password_hash,
            role,
            organization_id,
            current_organization_id: Some(organization_id),
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&user).await?;
        self.base.find_by_id(id).await
    }

    /// Global lookup, used by login and by the owner-email check at
    /// organization signup. Email comparison is case-insensitive by
    /// construction: stored lowercased, input lowercased here.
    pub async fn find_by_email(&self, email: &str) -> DaoResult<User> {
        self.base
            .find_one(doc! { "email": email.to_lowercase() })
            .await?
            .ok_or(DaoError::NotFound)
    }

    /// Per-organization lookup, used by the team-member email uniqueness
    /// check. Self-service creation only rejects duplicates within the
    /// active organization.
    pub async fn find_by_email_in_org(
        &self,
        scope: TenantScope,
        email: &str,
    ) -> DaoResult<Option<User>> {
        self.base
            .find_one(doc! {
                "email": email.to_lowercase(),
                "organization_id": scope.organization_id(),
            })
            .await
    }

    pub async fn list_members(&self, scope: TenantScope) -> DaoResult<Vec<User>> {
        self.base
            .find_many_scoped(scope, doc! {}, Some(doc! { "name": 1 }))
            .await
    }

    pub async fn update_member(
        &self,
        scope: TenantScope,
        user_id: ObjectId,
        set: Document,
    ) -> DaoResult<User> {
        self.base.update_by_id_scoped(scope, user_id, set).await
    }

    pub async fn delete_member(&self, scope: TenantScope, user_id: ObjectId) -> DaoResult<User> {
        self.base.delete_by_id_scoped(scope, user_id).await
    }

    pub async fn set_current_organization(
        &self,
        user_id: ObjectId,
        organization_id: ObjectId,
    ) -> DaoResult<bool> {
        self.base
            .update_one(
                doc! { "_id": user_id },
                doc! { "$set": { "current_organization_id": organization_id } },
            )
            .await
    }
}
