use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "album_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Logical path of the stored file under the uploads root.
    pub file_path: String,

    /// Exact byte length of the file as received. Quota accounting depends
    /// on this matching the on-disk size at creation time.
    pub file_size: i64,

    /// "image" or "video".
    pub media_type: String,

    pub is_public: bool,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub design_config: Option<serde_json::Value>,

    pub owner_id: i32,
    #[sea_orm(belongs_to, from = "owner_id", to = "id")]
    pub owner: HasOne<super::user::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
