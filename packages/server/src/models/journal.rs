use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::gallery::{MediaItem, gallery_entries};
use crate::error::AppError;

use super::shared::{double_option, validate_content, validate_title};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateJournalRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_public: bool,
    pub design_config: Option<serde_json::Value>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateJournalRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<serde_json::Value>)]
    pub design_config: Option<Option<serde_json::Value>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct JournalResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub media_gallery: Vec<MediaItem>,
    pub is_public: bool,
    pub design_config: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::journal_entry::Model> for JournalResponse {
    fn from(m: crate::entity::journal_entry::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            media_gallery: gallery_entries(&m.media_gallery),
            is_public: m.is_public,
            design_config: m.design_config,
            created_at: m.created_at,
        }
    }
}

/// Full gallery returned after a media append.
#[derive(Serialize, utoipa::ToSchema)]
pub struct GalleryResponse {
    pub media_gallery: Vec<MediaItem>,
}

pub fn validate_create_journal(req: &CreateJournalRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_content(&req.content)
}

pub fn validate_update_journal(req: &UpdateJournalRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref content) = req.content {
        validate_content(content)?;
    }
    Ok(())
}
