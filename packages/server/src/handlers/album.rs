use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::sea_query::Alias;
use sea_orm::*;
use tracing::instrument;

use crate::entity::album_item;
use crate::entity::gallery::MediaKind;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::album::{AlbumItemResponse, UpdateAlbumItemRequest};
use crate::models::shared::ListQuery;
use crate::state::AppState;
use crate::utils::filename::validate_upload_filename;
use crate::utils::media::unique_media_path;

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(128 * 1024 * 1024) // 128 MB
}

#[utoipa::path(
    post,
    path = "/api/v1/album/upload",
    tag = "Album",
    operation_id = "uploadAlbumItem",
    summary = "Upload a photo or video to the album",
    description = "Multipart upload with a required `file` field and an optional \
        `is_public` text field (`true`/`false`). Rejected with CAPACITY_EXCEEDED \
        when the upload would push total album storage past 100 MiB.",
    request_body(content_type = "multipart/form-data", description = "File upload with optional visibility flag"),
    responses(
        (status = 201, description = "Album item created", body = AlbumItemResponse),
        (status = 400, description = "Validation or quota error (VALIDATION_ERROR, CAPACITY_EXCEEDED)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(user_id = auth_user.user_id))]
pub async fn upload_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file: Option<(String, MediaKind, axum::body::Bytes)> = None;
    let mut is_public = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let name = field
                    .file_name()
                    .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?
                    .to_string();
                let name = validate_upload_filename(&name)
                    .map_err(|e| AppError::Validation(e.message().into()))?
                    .to_string();
                let kind = MediaKind::from_content_type(field.content_type());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some((name, kind, data));
            }
            Some("is_public") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read is_public: {e}"))
                })?;
                is_public = matches!(text.trim(), "true" | "True" | "1");
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let (name, kind, data) = file.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    let size = data.len() as u64;

    // Quota is system-wide, not per-user. Check-then-write is best effort:
    // two concurrent uploads can both pass the check.
    let used = album_bytes(&state.db, None).await?;
    if used as u64 + size > state.config.storage.album_quota_bytes {
        return Err(AppError::CapacityExceeded);
    }

    let path = unique_media_path("", &auth_user.user_id.to_string(), &name);
    let written = state.media.put(&path, &data).await?;

    let new_item = album_item::ActiveModel {
        file_path: Set(path),
        file_size: Set(i64::try_from(written).unwrap_or(i64::MAX)),
        media_type: Set(kind.as_str().to_string()),
        is_public: Set(is_public),
        owner_id: Set(auth_user.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_item.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(AlbumItemResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/album",
    tag = "Album",
    operation_id = "listAlbumItems",
    summary = "List the caller's album items",
    params(ListQuery),
    responses(
        (status = 200, description = "Album items, oldest first", body = [AlbumItemResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_items(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AlbumItemResponse>>, AppError> {
    let items = album_item::Entity::find()
        .filter(album_item::Column::OwnerId.eq(auth_user.user_id))
        .order_by_asc(album_item::Column::Id)
        .offset(Some(query.offset()))
        .limit(Some(query.limit()))
        .all(&state.db)
        .await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/album/public",
    tag = "Album",
    operation_id = "listPublicAlbumItems",
    summary = "List public album items",
    description = "No credential required. Returns only items marked public.",
    params(ListQuery),
    responses(
        (status = 200, description = "Public album items, oldest first", body = [AlbumItemResponse]),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_public_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AlbumItemResponse>>, AppError> {
    let items = album_item::Entity::find()
        .filter(album_item::Column::IsPublic.eq(true))
        .order_by_asc(album_item::Column::Id)
        .offset(Some(query.offset()))
        .limit(Some(query.limit()))
        .all(&state.db)
        .await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/album/{id}",
    tag = "Album",
    operation_id = "getAlbumItem",
    summary = "Get one of the caller's album items",
    params(("id" = i32, Path, description = "Album item ID")),
    responses(
        (status = 200, description = "Album item details", body = AlbumItemResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn get_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AlbumItemResponse>, AppError> {
    let model = find_item(&state.db, id, auth_user.user_id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/album/{id}",
    tag = "Album",
    operation_id = "updateAlbumItem",
    summary = "Update an album item's visibility or design blob",
    params(("id" = i32, Path, description = "Album item ID")),
    request_body = UpdateAlbumItemRequest,
    responses(
        (status = 200, description = "Album item updated", body = AlbumItemResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, user_id = auth_user.user_id))]
pub async fn update_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateAlbumItemRequest>,
) -> Result<Json<AlbumItemResponse>, AppError> {
    let existing = find_item(&state.db, id, auth_user.user_id).await?;
    let mut active: album_item::ActiveModel = existing.into();

    if let Some(is_public) = payload.is_public {
        active.is_public = Set(is_public);
    }
    if let Some(design_config) = payload.design_config {
        active.design_config = Set(design_config);
    }

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/album/{id}",
    tag = "Album",
    operation_id = "deleteAlbumItem",
    summary = "Delete an album item",
    description = "Removes the record; the stored file stays on disk but its \
        bytes no longer count against the quota.",
    params(("id" = i32, Path, description = "Album item ID")),
    responses(
        (status = 204, description = "Album item deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn delete_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = album_item::Entity::delete_many()
        .filter(album_item::Column::Id.eq(id))
        .filter(album_item::Column::OwnerId.eq(auth_user.user_id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Album item not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Sum of `file_size` over album rows, in bytes. `owner` restricts the sum
/// to one user; `None` is the system-wide total used by the quota guard.
pub(crate) async fn album_bytes<C: sea_orm::ConnectionTrait>(
    db: &C,
    owner: Option<i32>,
) -> Result<i64, AppError> {
    let mut select = album_item::Entity::find();
    if let Some(owner_id) = owner {
        select = select.filter(album_item::Column::OwnerId.eq(owner_id));
    }

    // SUM(bigint) comes back as NUMERIC in Postgres, so cast it back down.
    let total: Option<i64> = select
        .select_only()
        .column_as(
            album_item::Column::FileSize.sum().cast_as(Alias::new("BIGINT")),
            "total",
        )
        .into_tuple()
        .one(db)
        .await?
        .flatten();

    Ok(total.unwrap_or(0))
}

async fn find_item<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: i32,
    owner_id: i32,
) -> Result<album_item::Model, AppError> {
    album_item::Entity::find_by_id(id)
        .filter(album_item::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Album item not found".into()))
}
