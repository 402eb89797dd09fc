pub mod activity;
pub mod analytics;
pub mod auth;
pub mod customer;
pub mod demo;
pub mod notification;
pub mod organization;
pub mod project;
pub mod task;
pub mod user;

use bson::oid::ObjectId;

use crate::error::ApiError;

/// Parse a path/body id, surfacing a 400 rather than a 404 for ids that
/// are not even well-formed.
pub fn parse_object_id(value: &str, field: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(value).map_err(|_| ApiError::BadRequest(format!("Invalid {field}")))
}

/// Collect missing required create/update fields into one validation
/// failure that names all of them.
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// RFC 3339 string for response payloads.
pub fn fmt_datetime(dt: bson::DateTime) -> String {
    dt.try_to_rfc3339_string().unwrap_or_default()
}

/// Parse an RFC 3339 request field into a bson timestamp.
pub fn parse_datetime(value: &str, field: &str) -> Result<bson::DateTime, ApiError> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| bson::DateTime::from_chrono(dt.with_timezone(&chrono::Utc)))
        .map_err(|_| ApiError::Validation(format!("Invalid {field}: expected RFC 3339 date")))
}
