use bson::oid::ObjectId;

/// The active organization for a request.
///
/// Every tenant-scoped DAO method takes a `TenantScope` as a required
/// parameter, so a query against a tenant-owned collection cannot be
/// written without one. The scope is only ever built from verified
/// session claims (or, in tests, from a seeded organization id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope(ObjectId);

impl TenantScope {
    pub fn new(organization_id: ObjectId) -> Self {
        Self(organization_id)
    }

    /// Resolve the active organization from session claims: the current
    /// organization when set, the home organization otherwise.
    pub fn from_session(home: ObjectId, current: Option<ObjectId>) -> Self {
        Self(current.unwrap_or(home))
    }

    pub fn organization_id(&self) -> ObjectId {
        self.0
    }
}
