use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::journal_entry;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::journal::*;
use crate::models::shared::ListQuery;
use crate::state::AppState;
use crate::utils::media::{appended_gallery, store_media_fields};

pub fn media_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(128 * 1024 * 1024) // 128 MB
}

#[utoipa::path(
    post,
    path = "/api/v1/journal",
    tag = "Journal",
    operation_id = "createJournalEntry",
    summary = "Create a journal entry",
    request_body = CreateJournalRequest,
    responses(
        (status = 201, description = "Entry created", body = JournalResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn create_entry(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateJournalRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_journal(&payload)?;

    let new_entry = journal_entry::ActiveModel {
        title: Set(payload.title),
        content: Set(payload.content),
        media_gallery: Set(serde_json::Value::Array(Vec::new())),
        is_public: Set(payload.is_public),
        design_config: Set(payload.design_config),
        owner_id: Set(auth_user.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_entry.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(JournalResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/journal",
    tag = "Journal",
    operation_id = "listJournalEntries",
    summary = "List the caller's journal entries",
    params(ListQuery),
    responses(
        (status = 200, description = "Entries, oldest first", body = [JournalResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_entries(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<JournalResponse>>, AppError> {
    let entries = journal_entry::Entity::find()
        .filter(journal_entry::Column::OwnerId.eq(auth_user.user_id))
        .order_by_asc(journal_entry::Column::Id)
        .offset(Some(query.offset()))
        .limit(Some(query.limit()))
        .all(&state.db)
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/journal/{id}",
    tag = "Journal",
    operation_id = "getJournalEntry",
    summary = "Get one of the caller's journal entries",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry details", body = JournalResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn get_entry(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<JournalResponse>, AppError> {
    let model = find_entry(&state.db, id, auth_user.user_id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/journal/{id}",
    tag = "Journal",
    operation_id = "updateJournalEntry",
    summary = "Update a journal entry",
    description = "Partial update: absent fields are left untouched. \
        `design_config: null` clears the stored blob.",
    params(("id" = i32, Path, description = "Entry ID")),
    request_body = UpdateJournalRequest,
    responses(
        (status = 200, description = "Entry updated", body = JournalResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, user_id = auth_user.user_id))]
pub async fn update_entry(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateJournalRequest>,
) -> Result<Json<JournalResponse>, AppError> {
    validate_update_journal(&payload)?;

    let existing = find_entry(&state.db, id, auth_user.user_id).await?;
    let mut active: journal_entry::ActiveModel = existing.into();

    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
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
    path = "/api/v1/journal/{id}",
    tag = "Journal",
    operation_id = "deleteJournalEntry",
    summary = "Delete a journal entry",
    description = "Hard delete of the record. Files referenced by the gallery stay on disk.",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn delete_entry(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = journal_entry::Entity::delete_many()
        .filter(journal_entry::Column::Id.eq(id))
        .filter(journal_entry::Column::OwnerId.eq(auth_user.user_id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Journal entry not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/journal/{id}/media",
    tag = "Journal",
    operation_id = "uploadJournalMedia",
    summary = "Append media files to a journal entry's gallery",
    description = "Accepts one or more multipart file fields. All files succeed \
        or none do. Returns the full gallery after the append.",
    params(("id" = i32, Path, description = "Entry ID")),
    request_body(content_type = "multipart/form-data", description = "One or more files"),
    responses(
        (status = 200, description = "Updated gallery", body = GalleryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(id, user_id = auth_user.user_id))]
pub async fn upload_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<GalleryResponse>, AppError> {
    let existing = find_entry(&state.db, id, auth_user.user_id).await?;

    let stored =
        store_media_fields(&mut multipart, &*state.media, "journal", &id.to_string()).await?;

    let gallery = appended_gallery(&existing.media_gallery, &stored);
    let mut active: journal_entry::ActiveModel = existing.into();
    active.media_gallery = Set(gallery.clone());
    active.update(&state.db).await?;

    Ok(Json(GalleryResponse {
        media_gallery: crate::entity::gallery::gallery_entries(&gallery),
    }))
}

async fn find_entry<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: i32,
    owner_id: i32,
) -> Result<journal_entry::Model, AppError> {
    journal_entry::Entity::find_by_id(id)
        .filter(journal_entry::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Journal entry not found".into()))
}
