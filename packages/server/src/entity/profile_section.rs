use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile_section")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Free-form section kind, e.g. "about" or "links".
    pub section_type: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Ordered JSON array of `{url, type}` entries. Append-only via the API.
    #[sea_orm(column_type = "JsonBinary")]
    pub media_gallery: serde_json::Value,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub design_config: Option<serde_json::Value>,

    /// Display order on the profile page. Not required to be unique.
    pub position: i32,

    pub owner_id: i32,
    #[sea_orm(belongs_to, from = "owner_id", to = "id")]
    pub owner: HasOne<super::user::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
