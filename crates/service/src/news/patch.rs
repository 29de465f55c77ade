//! Partial update payloads.
//!
//! A patch is a JSON object of field name to value. Known fields are replaced
//! unconditionally, including with empty strings; optional fields may be set
//! to `null`. Unknown names, and the immutable `id` and `published_at`, are
//! dropped without being reported.

use models::news::NewsChanges;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::ServiceError;

pub const PATCHABLE_FIELDS: [&str; 8] = [
    "title",
    "description",
    "snippet",
    "url",
    "imageUrl",
    "language",
    "source",
    "categories",
];

fn required_string(field: &str, value: Value) -> Result<String, ServiceError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Err(ServiceError::Validation(format!("{field} cannot be null"))),
        _ => Err(ServiceError::Validation(format!("{field} must be a string"))),
    }
}

fn optional_string(field: &str, value: Value) -> Result<Option<String>, ServiceError> {
    match value {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        _ => Err(ServiceError::Validation(format!("{field} must be a string or null"))),
    }
}

/// Turn a raw patch body into column replacements.
pub fn changes_from_patch(body: Map<String, Value>) -> Result<NewsChanges, ServiceError> {
    let mut changes = NewsChanges::default();
    for (key, value) in body {
        match key.as_str() {
            "title" => changes.title = Some(required_string(&key, value)?),
            "description" => changes.description = Some(required_string(&key, value)?),
            "snippet" => changes.snippet = Some(optional_string(&key, value)?),
            "url" => changes.url = Some(optional_string(&key, value)?),
            "imageUrl" => changes.image_url = Some(optional_string(&key, value)?),
            "language" => changes.language = Some(optional_string(&key, value)?),
            "source" => changes.source = Some(optional_string(&key, value)?),
            "categories" => changes.categories = Some(optional_string(&key, value)?),
            _ => debug!(field = %key, "ignoring unknown patch field"),
        }
    }
    Ok(changes)
}
