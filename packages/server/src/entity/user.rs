use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,

    /// Logical path of the profile picture under the uploads root.
    pub profile_picture: Option<String>,

    /// Opaque client-controlled theme blob. Never inspected server-side.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub profile_theme: Option<serde_json::Value>,

    #[sea_orm(has_many)]
    pub journal_entries: HasMany<super::journal_entry::Entity>,

    #[sea_orm(has_many)]
    pub album_items: HasMany<super::album_item::Entity>,

    #[sea_orm(has_many)]
    pub blog_posts: HasMany<super::blog_post::Entity>,

    #[sea_orm(has_many)]
    pub profile_sections: HasMany<super::profile_section::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
