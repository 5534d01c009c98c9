use std::collections::HashMap;

use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{profile_section, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::auth::find_user;
use crate::models::auth::UserResponse;
use crate::models::journal::GalleryResponse;
use crate::models::profile::*;
use crate::state::AppState;
use crate::utils::filename::validate_upload_filename;
use crate::utils::media::{appended_gallery, store_media_fields, unique_media_path};

pub fn media_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(128 * 1024 * 1024) // 128 MB
}

#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "Profile",
    operation_id = "getProfile",
    summary = "The caller's profile sections",
    description = "Sections are returned in display order.",
    responses(
        (status = 200, description = "Sections by position, ascending", body = [SectionResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SectionResponse>>, AppError> {
    let sections = profile_section::Entity::find()
        .filter(profile_section::Column::OwnerId.eq(auth_user.user_id))
        .order_by_asc(profile_section::Column::Position)
        .order_by_asc(profile_section::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(sections.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/profile/me",
    tag = "Profile",
    operation_id = "getProfileMe",
    summary = "Caller's profile metadata",
    responses(
        (status = 200, description = "Profile picture, theme and account info", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = find_user(&state.db, auth_user.user_id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/profile/section",
    tag = "Profile",
    operation_id = "createProfileSection",
    summary = "Create a profile section",
    request_body = CreateSectionRequest,
    responses(
        (status = 201, description = "Section created", body = SectionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn create_section(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSectionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_section(&payload)?;

    let new_section = profile_section::ActiveModel {
        section_type: Set(payload.section_type),
        title: Set(payload.title),
        content: Set(payload.content),
        media_gallery: Set(serde_json::Value::Array(Vec::new())),
        design_config: Set(payload.design_config),
        position: Set(payload.position),
        owner_id: Set(auth_user.user_id),
        ..Default::default()
    };

    let model = new_section.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(SectionResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/api/v1/profile/section/{id}",
    tag = "Profile",
    operation_id = "updateProfileSection",
    summary = "Update a profile section",
    description = "Partial update: absent fields are left untouched. \
        `design_config: null` clears the stored blob.",
    params(("id" = i32, Path, description = "Section ID")),
    request_body = UpdateSectionRequest,
    responses(
        (status = 200, description = "Section updated", body = SectionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, user_id = auth_user.user_id))]
pub async fn update_section(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSectionRequest>,
) -> Result<Json<SectionResponse>, AppError> {
    validate_update_section(&payload)?;

    let existing = find_section(&state.db, id, auth_user.user_id).await?;
    let mut active: profile_section::ActiveModel = existing.into();

    if let Some(section_type) = payload.section_type {
        active.section_type = Set(section_type);
    }
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    if let Some(position) = payload.position {
        active.position = Set(position);
    }
    if let Some(design_config) = payload.design_config {
        active.design_config = Set(design_config);
    }

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/profile/section/{id}",
    tag = "Profile",
    operation_id = "deleteProfileSection",
    summary = "Delete a profile section",
    params(("id" = i32, Path, description = "Section ID")),
    responses(
        (status = 204, description = "Section deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn delete_section(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = profile_section::Entity::delete_many()
        .filter(profile_section::Column::Id.eq(id))
        .filter(profile_section::Column::OwnerId.eq(auth_user.user_id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Profile section not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/profile/section/{id}/media",
    tag = "Profile",
    operation_id = "uploadSectionMedia",
    summary = "Append media files to a section's gallery",
    description = "Accepts one or more multipart file fields. All files succeed \
        or none do. Returns the full gallery after the append.",
    params(("id" = i32, Path, description = "Section ID")),
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
pub async fn upload_section_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<GalleryResponse>, AppError> {
    let existing = find_section(&state.db, id, auth_user.user_id).await?;

    let stored =
        store_media_fields(&mut multipart, &*state.media, "profile", &id.to_string()).await?;

    let gallery = appended_gallery(&existing.media_gallery, &stored);
    let mut active: profile_section::ActiveModel = existing.into();
    active.media_gallery = Set(gallery.clone());
    active.update(&state.db).await?;

    Ok(Json(GalleryResponse {
        media_gallery: crate::entity::gallery::gallery_entries(&gallery),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/profile/picture",
    tag = "Profile",
    operation_id = "uploadProfilePicture",
    summary = "Replace the profile picture",
    description = "Single `file` multipart field. The previous picture's file \
        stays on disk; only the reference is replaced.",
    request_body(content_type = "multipart/form-data", description = "Image file"),
    responses(
        (status = 200, description = "New picture path", body = ProfilePictureResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(user_id = auth_user.user_id))]
pub async fn upload_picture(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProfilePictureResponse>, AppError> {
    let mut stored_path: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field
            .file_name()
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?
            .to_string();
        let name = validate_upload_filename(&name)
            .map_err(|e| AppError::Validation(e.message().into()))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let path = unique_media_path("profile", &format!("user_{}", auth_user.user_id), &name);
        state.media.put(&path, &data).await?;
        stored_path = Some(path);
    }

    let path = stored_path.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let user = find_user(&state.db, auth_user.user_id).await?;
    let mut active: user::ActiveModel = user.into();
    active.profile_picture = Set(Some(path.clone()));
    active.update(&state.db).await?;

    Ok(Json(ProfilePictureResponse {
        profile_picture: path,
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/profile/theme",
    tag = "Profile",
    operation_id = "updateProfileTheme",
    summary = "Replace the profile theme blob",
    description = "The body is stored verbatim and never inspected server-side.",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated account info", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_theme(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<serde_json::Value>,
) -> Result<Json<UserResponse>, AppError> {
    let user = find_user(&state.db, auth_user.user_id).await?;
    let mut active: user::ActiveModel = user.into();
    active.profile_theme = Set(Some(payload));
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/profile/reorder",
    tag = "Profile",
    operation_id = "reorderProfileSections",
    summary = "Reposition profile sections",
    description = "Body is a JSON object mapping section ids (as strings) to new \
        positions, e.g. `{\"12\": 0, \"7\": 1}`. Ids the caller does not own are \
        ignored. Returns the resulting section list.",
    request_body = HashMap<String, i32>,
    responses(
        (status = 200, description = "Sections by position, ascending", body = [SectionResponse]),
        (status = 400, description = "Non-numeric section id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn reorder_sections(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<HashMap<String, i32>>,
) -> Result<Json<Vec<SectionResponse>>, AppError> {
    let pairs = parse_reorder_map(&payload)?;

    let txn = state.db.begin().await?;
    for (id, position) in pairs {
        // Silently skips ids that don't exist or aren't the caller's.
        profile_section::Entity::update_many()
            .col_expr(profile_section::Column::Position, Expr::value(position))
            .filter(profile_section::Column::Id.eq(id))
            .filter(profile_section::Column::OwnerId.eq(auth_user.user_id))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    let sections = profile_section::Entity::find()
        .filter(profile_section::Column::OwnerId.eq(auth_user.user_id))
        .order_by_asc(profile_section::Column::Position)
        .order_by_asc(profile_section::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(sections.into_iter().map(Into::into).collect()))
}

async fn find_section<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: i32,
    owner_id: i32,
) -> Result<profile_section::Model, AppError> {
    profile_section::Entity::find_by_id(id)
        .filter(profile_section::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile section not found".into()))
}
