use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use prisbo_db::models::{OrgStatus, Organization, Plan};

use super::base::{BaseDao, DaoError, DaoResult};

pub struct OrganizationDao {
    pub base: BaseDao<Organization>,
}

impl OrganizationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Organization::COLLECTION),
        }
    }

    /// Insert a new organization with plan-derived limits. `owner_id` is
    /// left unset; signup patches it after the owner user exists.
    pub async fn create(
        &self,
        name: String,
        slug: String,
        email: String,
        phone: Option<String>,
        domain: Option<String>,
        plan: Plan,
    ) -> DaoResult<Organization> {
        let now = DateTime::now();
        let org = Organization {
            id: None,
            name,
            slug,
            email: email.to_lowercase(),
            phone,
            domain,
            plan,
            status: OrgStatus::Active,
            subscription_id: None,
            billing_email: Some(email.to_lowercase()),
            max_users: plan.max_users(),
            max_projects: plan.max_projects(),
            owner_id: None,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&org).await?;
        self.base.find_by_id(id).await
    }

    pub async fn set_owner(&self, org_id: ObjectId, owner_id: ObjectId) -> DaoResult<bool> {
        self.base
            .update_one(
                doc! { "_id": org_id },
                doc! { "$set": { "owner_id": owner_id } },
            )
            .await
    }

    pub async fn find_by_slug(&self, slug: &str) -> DaoResult<Organization> {
        self.base
            .find_one(doc! { "slug": slug })
            .await?
            .ok_or(DaoError::NotFound)
    }

    /// Derive a globally unique slug from the organization name by
    /// appending a numeric suffix until no collision remains.
    pub async fn unique_slug(&self, name: &str) -> DaoResult<String> {
        let base = slugify(name);
        let mut slug = base.clone();
        let mut counter = 1u32;

        while self.base.find_one(doc! { "slug": &slug }).await?.is_some() {
            slug = format!("{base}-{counter}");
            counter += 1;
        }

        Ok(slug)
    }
}

/// Lowercase, collapse non-alphanumeric runs to `-`, trim leading and
/// trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
