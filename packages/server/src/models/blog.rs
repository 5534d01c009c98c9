use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::gallery::{MediaItem, gallery_entries};
use crate::error::AppError;

use super::shared::{double_option, validate_content, validate_title};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBlogPostRequest {
    pub title: String,
    pub content: String,
    /// Comma-separated tag list, stored verbatim.
    pub tags: Option<String>,
    pub design_config: Option<serde_json::Value>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateBlogPostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub tags: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<serde_json::Value>)]
    pub design_config: Option<Option<serde_json::Value>>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct RankRequest {
    /// Signed increment applied to the post's ranking.
    #[schema(example = 1)]
    pub rank_delta: i64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogPostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub tags: Option<String>,
    pub media_gallery: Vec<MediaItem>,
    pub ranking: i64,
    pub design_config: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::blog_post::Model> for BlogPostResponse {
    fn from(m: crate::entity::blog_post::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            tags: m.tags,
            media_gallery: gallery_entries(&m.media_gallery),
            ranking: m.ranking,
            design_config: m.design_config,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_blog_post(req: &CreateBlogPostRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_content(&req.content)?;
    if let Some(ref tags) = req.tags
        && tags.chars().count() > 512
    {
        return Err(AppError::Validation(
            "Tags must be at most 512 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_update_blog_post(req: &UpdateBlogPostRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref content) = req.content {
        validate_content(content)?;
    }
    if let Some(Some(ref tags)) = req.tags
        && tags.chars().count() > 512
    {
        return Err(AppError::Validation(
            "Tags must be at most 512 characters".into(),
        ));
    }
    Ok(())
}
