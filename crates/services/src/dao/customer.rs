use bson::{DateTime, Document, doc, oid::ObjectId};
use mongodb::Database;
use prisbo_db::models::{Customer, CustomerStatus};

use super::base::{BaseDao, DaoResult, PaginatedResult, PaginationParams, escape_regex};
use crate::tenant::TenantScope;

pub struct CustomerDao {
    pub base: BaseDao<Customer>,
}

impl CustomerDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Customer::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        scope: TenantScope,
        created_by: ObjectId,
        name: String,
        email: String,
        phone: String,
        status: CustomerStatus,
        notes: Option<String>,
    ) -> DaoResult<Customer> {
        let now = DateTime::now();
        let customer = Customer {
            id: None,
            name,
            email,
            phone,
            status,
            notes,
            created_by,
            organization_id: scope.organization_id(),
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&customer).await?;
        self.base.find_by_id_scoped(scope, id).await
    }

    /// Case-insensitive substring search over name/email, optional status
    /// equality, newest first.
    pub async fn list(
        &self,
        scope: TenantScope,
        search: Option<&str>,
        status: Option<CustomerStatus>,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<Customer>> {
        let mut filter = Document::new();

        if let Some(term) = search {
            let pattern = escape_regex(term);
            filter.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": &pattern, "$options": "i" } },
                    doc! { "email": { "$regex": &pattern, "$options": "i" } },
                ],
            );
        }
        if let Some(status) = status {
            filter.insert("status", bson::to_bson(&status)?);
        }

        self.base
            .find_paginated(scope, filter, Some(doc! { "created_at": -1 }), params)
            .await
    }

    pub async fn update(
        &self,
        scope: TenantScope,
        id: ObjectId,
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        status: Option<CustomerStatus>,
        notes: Option<String>,
    ) -> DaoResult<Customer> {
        let mut set = Document::new();
        if let Some(name) = name {
            set.insert("name", name);
        }
        if let Some(email) = email {
            set.insert("email", email);
        }
        if let Some(phone) = phone {
            set.insert("phone", phone);
        }
        if let Some(status) = status {
            set.insert("status", bson::to_bson(&status)?);
        }
        if let Some(notes) = notes {
            set.insert("notes", notes);
        }

        self.base.update_by_id_scoped(scope, id, set).await
    }
}
