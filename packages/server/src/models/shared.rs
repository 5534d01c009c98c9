use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Offset/limit query parameters shared by list endpoints.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Number of records to skip.
    #[param(example = 0)]
    pub offset: Option<u64>,
    /// Maximum number of records to return (default 100).
    #[param(example = 100)]
    pub limit: Option<u64>,
}

impl ListQuery {
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(100)
    }
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate content text (non-empty, at most 1MB).
pub fn validate_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() || content.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Content must be non-empty and at most 1MB".into(),
        ));
    }
    Ok(())
}
