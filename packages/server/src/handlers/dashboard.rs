use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blog_post, journal_entry};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::album::album_bytes;
use crate::models::dashboard::{DashboardStats, RecentActivity, merge_recent, storage_used_mb};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    operation_id = "getDashboardStats",
    summary = "Aggregate counts, storage use and recent activity",
    description = "Counts and storage are scoped to the caller. Recent activity \
        merges the five newest journal entries and five newest blog posts, \
        newest first, capped at eight.",
    responses(
        (status = 200, description = "Dashboard aggregation", body = DashboardStats),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_stats(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let owner = auth_user.user_id;

    let journal_count = journal_entry::Entity::find()
        .filter(journal_entry::Column::OwnerId.eq(owner))
        .count(&state.db)
        .await?;
    let blog_count = blog_post::Entity::find()
        .filter(blog_post::Column::OwnerId.eq(owner))
        .count(&state.db)
        .await?;
    let album_count = crate::entity::album_item::Entity::find()
        .filter(crate::entity::album_item::Column::OwnerId.eq(owner))
        .count(&state.db)
        .await?;

    let bytes = album_bytes(&state.db, Some(owner)).await?;

    let journals = journal_entry::Entity::find()
        .filter(journal_entry::Column::OwnerId.eq(owner))
        .order_by_desc(journal_entry::Column::CreatedAt)
        .limit(Some(5))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|e| RecentActivity {
            kind: "journal",
            id: e.id,
            title: e.title,
            created_at: e.created_at,
        })
        .collect();

    let blogs = blog_post::Entity::find()
        .filter(blog_post::Column::OwnerId.eq(owner))
        .order_by_desc(blog_post::Column::CreatedAt)
        .limit(Some(5))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|p| RecentActivity {
            kind: "blog",
            id: p.id,
            title: p.title,
            created_at: p.created_at,
        })
        .collect();

    Ok(Json(DashboardStats {
        journal_count,
        blog_count,
        album_count,
        storage_used_mb: storage_used_mb(bytes),
        recent_activity: merge_recent(journals, blogs),
    }))
}
