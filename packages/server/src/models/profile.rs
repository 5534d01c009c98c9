use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entity::gallery::{MediaItem, gallery_entries};
use crate::error::AppError;

use super::shared::{double_option, validate_title};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSectionRequest {
    /// Free-form section kind (e.g. "bio", "links", "gallery").
    pub section_type: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Display position; defaults to 0.
    #[serde(default)]
    pub position: i32,
    pub design_config: Option<serde_json::Value>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateSectionRequest {
    pub section_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub position: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<serde_json::Value>)]
    pub design_config: Option<Option<serde_json::Value>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SectionResponse {
    pub id: i32,
    pub section_type: String,
    pub title: String,
    pub content: String,
    pub media_gallery: Vec<MediaItem>,
    pub design_config: Option<serde_json::Value>,
    pub position: i32,
}

impl From<crate::entity::profile_section::Model> for SectionResponse {
    fn from(m: crate::entity::profile_section::Model) -> Self {
        Self {
            id: m.id,
            section_type: m.section_type,
            title: m.title,
            content: m.content,
            media_gallery: gallery_entries(&m.media_gallery),
            design_config: m.design_config,
            position: m.position,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfilePictureResponse {
    pub profile_picture: String,
}

fn validate_section_type(section_type: &str) -> Result<(), AppError> {
    let section_type = section_type.trim();
    if section_type.is_empty() || section_type.chars().count() > 64 {
        return Err(AppError::Validation(
            "Section type must be 1-64 characters".into(),
        ));
    }
    Ok(())
}

fn validate_section_content(content: &str) -> Result<(), AppError> {
    // Sections may be media-only, so empty content is fine.
    if content.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Content must be at most 1MB".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_section(req: &CreateSectionRequest) -> Result<(), AppError> {
    validate_section_type(&req.section_type)?;
    validate_title(&req.title)?;
    validate_section_content(&req.content)
}

pub fn validate_update_section(req: &UpdateSectionRequest) -> Result<(), AppError> {
    if let Some(ref section_type) = req.section_type {
        validate_section_type(section_type)?;
    }
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref content) = req.content {
        validate_section_content(content)?;
    }
    Ok(())
}

/// Parse a reorder map (`{"12": 0, "7": 1}`) into `(section_id, position)`
/// pairs. Keys arrive as strings because JSON object keys always are.
pub fn parse_reorder_map(map: &HashMap<String, i32>) -> Result<Vec<(i32, i32)>, AppError> {
    let mut pairs = Vec::with_capacity(map.len());
    for (key, &position) in map {
        let id: i32 = key
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid section id '{key}'")))?;
        pairs.push((id, position));
    }
    Ok(pairs)
}
