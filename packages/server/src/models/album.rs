use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::double_option;

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateAlbumItemRequest {
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<serde_json::Value>)]
    pub design_config: Option<Option<serde_json::Value>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AlbumItemResponse {
    pub id: i32,
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,
    pub is_public: bool,
    pub design_config: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::album_item::Model> for AlbumItemResponse {
    fn from(m: crate::entity::album_item::Model) -> Self {
        Self {
            id: m.id,
            file_path: m.file_path,
            file_size: m.file_size,
            media_type: m.media_type,
            is_public: m.is_public,
            design_config: m.design_config,
            created_at: m.created_at,
        }
    }
}
