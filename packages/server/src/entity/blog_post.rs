use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Free-text tags, comma-separated by convention but uninterpreted.
    pub tags: Option<String>,

    /// Ordered JSON array of `{url, type}` entries. Append-only via the API.
    #[sea_orm(column_type = "JsonBinary")]
    pub media_gallery: serde_json::Value,

    /// Signed, unbounded. Any authenticated user may adjust it by a delta.
    pub ranking: i64,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub design_config: Option<serde_json::Value>,

    pub owner_id: i32,
    #[sea_orm(belongs_to, from = "owner_id", to = "id")]
    pub owner: HasOne<super::user::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
