use bson::{DateTime, Document, doc, oid::ObjectId};
use mongodb::Database;
use prisbo_db::models::{DemoRequest, DemoStatus};

use super::base::{BaseDao, DaoError, DaoResult, PaginatedResult, PaginationParams};

/// The one repository without tenant scoping: demo requests come in from
/// the public site and are triaged globally by admins.
pub struct DemoRequestDao {
    pub base: BaseDao<DemoRequest>,
}

impl DemoRequestDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, DemoRequest::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        phone: String,
        company: String,
        message: Option<String>,
    ) -> DaoResult<DemoRequest> {
        let now = DateTime::now();
        let request = DemoRequest {
            id: None,
            name,
            email: email.to_lowercase(),
            phone,
            company,
            message,
            status: DemoStatus::Pending,
            notes: None,
            contacted_by: None,
            scheduled_date: None,
            organization_id: None,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&request).await?;
        self.base.find_by_id(id).await
    }

    pub async fn list(
        &self,
        status: Option<DemoStatus>,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<DemoRequest>> {
        let mut filter = Document::new();
        if let Some(status) = status {
            filter.insert("status", bson::to_bson(&status)?);
        }

        self.base
            .find_paginated_unscoped(filter, Some(doc! { "created_at": -1 }), params)
            .await
    }

    /// Triage update. Any status value is accepted; moving to contacted
    /// or scheduled stamps the acting admin as `contacted_by`.
    pub async fn update(
        &self,
        id: ObjectId,
        acting_admin: ObjectId,
        status: Option<DemoStatus>,
        notes: Option<String>,
        scheduled_date: Option<DateTime>,
    ) -> DaoResult<DemoRequest> {
        let mut set = Document::new();
        if let Some(status) = status {
            set.insert("status", bson::to_bson(&status)?);
            if matches!(status, DemoStatus::Contacted | DemoStatus::Scheduled) {
                set.insert("contacted_by", acting_admin);
            }
        }
        if let Some(notes) = notes {
            set.insert("notes", notes);
        }
        if let Some(scheduled_date) = scheduled_date {
            set.insert("scheduled_date", scheduled_date);
        }
        set.insert("updated_at", DateTime::now());

        self.base
            .collection()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(mongodb::options::ReturnDocument::After)
            .await?
            .ok_or(DaoError::NotFound)
    }
}
