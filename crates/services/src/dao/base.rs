use bson::{Document, doc, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::tenant::TenantScope;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("BSON serialization error: {0}")]
    BsonSer(#[from] bson::ser::Error),
    #[error("BSON deserialization error: {0}")]
    BsonDe(#[from] bson::de::Error),
    #[error("Entity not found")]
    NotFound,
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Validation: {0}")]
    Validation(String),
}

pub type DaoResult<T> = Result<T, DaoError>;

/// Server-side ceiling for caller-supplied page sizes.
pub const MAX_PAGE_LIMIT: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PaginationParams {
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or_else(default_page),
            limit: limit.unwrap_or_else(default_limit),
        }
    }

    /// Page clamped to 1.., limit clamped to 1..=MAX_PAGE_LIMIT.
    pub fn clamped(&self) -> (u64, u64) {
        (self.page.max(1), self.limit.clamp(1, MAX_PAGE_LIMIT))
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// Escape a user-supplied search term for use inside a `$regex` predicate
/// so it matches as a literal substring.
pub fn escape_regex(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(
            c,
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Duplicate-key violations reach us as a write error on inserts and as
/// a command error on findAndModify; both carry code 11000.
fn map_write_error(e: mongodb::error::Error) -> DaoError {
    match *e.kind {
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(ref we))
            if we.code == 11000 =>
        {
            DaoError::DuplicateKey(we.message.clone())
        }
        mongodb::error::ErrorKind::Command(ref ce) if ce.code == 11000 => {
            DaoError::DuplicateKey(ce.message.clone())
        }
        _ => DaoError::Mongo(e),
    }
}

pub struct BaseDao<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T> BaseDao<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Unpin + Send + Sync,
{
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<T>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Unscoped lookup. Only for globally-scoped collections (demo
    /// requests) and for resolving a user/organization by its own id.
    pub async fn find_by_id(&self, id: ObjectId) -> DaoResult<T> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(DaoError::NotFound)
    }

    /// Scoped lookup. A nonexistent id and a cross-tenant id are the same
    /// `NotFound` to the caller.
    pub async fn find_by_id_scoped(&self, scope: TenantScope, id: ObjectId) -> DaoResult<T> {
        self.collection
            .find_one(doc! { "_id": id, "organization_id": scope.organization_id() })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn find_one(&self, filter: Document) -> DaoResult<Option<T>> {
        Ok(self.collection.find_one(filter).await?)
    }

    pub async fn find_many(&self, filter: Document, sort: Option<Document>) -> DaoResult<Vec<T>> {
        let mut cursor = if let Some(sort) = sort {
            self.collection.find(filter).sort(sort).await?
        } else {
            self.collection.find(filter).await?
        };

        let mut results = Vec::new();
        use futures::TryStreamExt;
        while let Some(doc) = cursor.try_next().await? {
            results.push(doc);
        }
        Ok(results)
    }

    /// Scoped list query: the organization predicate is injected here, on
    /// top of whatever entity-specific filter the caller built.
    pub async fn find_many_scoped(
        &self,
        scope: TenantScope,
        mut filter: Document,
        sort: Option<Document>,
    ) -> DaoResult<Vec<T>> {
        filter.insert("organization_id", scope.organization_id());
        self.find_many(filter, sort).await
    }

    pub async fn find_paginated(
        &self,
        scope: TenantScope,
        mut filter: Document,
        sort: Option<Document>,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<T>> {
        filter.insert("organization_id", scope.organization_id());
        self.find_paginated_unscoped(filter, sort, params).await
    }

    /// Pagination without the organization predicate. Demo requests are
    /// the only collection listed this way.
    pub async fn find_paginated_unscoped(
        &self,
        filter: Document,
        sort: Option<Document>,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<T>> {
        let (page, limit) = params.clamped();
        let total = self.collection.count_documents(filter.clone()).await?;
        let skip = (page - 1) * limit;

        let sort = sort.unwrap_or_else(|| doc! { "created_at": -1 });

        let mut cursor = self
            .collection
            .find(filter)
            .sort(sort)
            .skip(skip)
            .limit(limit as i64)
            .await?;

        let mut items = Vec::new();
        use futures::TryStreamExt;
        while let Some(doc) = cursor.try_next().await? {
            items.push(doc);
        }

        let total_pages = total.div_ceil(limit);

        Ok(PaginatedResult {
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }

    pub async fn insert_one(&self, doc: &T) -> DaoResult<ObjectId> {
        let result = self.collection.insert_one(doc).await.map_err(map_write_error)?;

        let id = result
            .inserted_id
            .as_object_id()
            .expect("inserted_id should be ObjectId");
        debug!(?id, "Inserted document");
        Ok(id)
    }

    pub async fn insert_many(&self, docs: &[T]) -> DaoResult<u64> {
        if docs.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(docs).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    /// Scoped find-then-update. Returns the updated document, or
    /// `NotFound` when the id is absent or belongs to another tenant.
    pub async fn update_by_id_scoped(
        &self,
        scope: TenantScope,
        id: ObjectId,
        mut set: Document,
    ) -> DaoResult<T> {
        set.insert("updated_at", bson::DateTime::now());
        self.collection
            .find_one_and_update(
                doc! { "_id": id, "organization_id": scope.organization_id() },
                doc! { "$set": set },
            )
            .return_document(mongodb::options::ReturnDocument::After)
            .await
            .map_err(map_write_error)?
            .ok_or(DaoError::NotFound)
    }

    pub async fn update_one(&self, filter: Document, update: Document) -> DaoResult<bool> {
        let mut update = update;
        match update.get_document_mut("$set") {
            Ok(set_doc) => {
                set_doc.insert("updated_at", bson::DateTime::now());
            }
            Err(_) => {
                update.insert("$set", doc! { "updated_at": bson::DateTime::now() });
            }
        }

        let result = self.collection.update_one(filter, update).await?;
        Ok(result.modified_count > 0)
    }

    pub async fn update_many(&self, filter: Document, update: Document) -> DaoResult<u64> {
        let result = self.collection.update_many(filter, update).await?;
        Ok(result.modified_count)
    }

    /// Scoped find-then-delete. Returns the deleted document so callers
    /// can log what was removed.
    pub async fn delete_by_id_scoped(&self, scope: TenantScope, id: ObjectId) -> DaoResult<T> {
        self.collection
            .find_one_and_delete(doc! { "_id": id, "organization_id": scope.organization_id() })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn count(&self, filter: Document) -> DaoResult<u64> {
        Ok(self.collection.count_documents(filter).await?)
    }

    pub async fn count_scoped(&self, scope: TenantScope, mut filter: Document) -> DaoResult<u64> {
        filter.insert("organization_id", scope.organization_id());
        self.count(filter).await
    }
}
