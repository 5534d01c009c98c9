use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::blog_post;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::blog::*;
use crate::models::journal::GalleryResponse;
use crate::models::shared::ListQuery;
use crate::state::AppState;
use crate::utils::media::{appended_gallery, store_media_fields};

pub fn media_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(128 * 1024 * 1024) // 128 MB
}

#[utoipa::path(
    post,
    path = "/api/v1/blog",
    tag = "Blog",
    operation_id = "createBlogPost",
    summary = "Create a blog post",
    request_body = CreateBlogPostRequest,
    responses(
        (status = 201, description = "Post created", body = BlogPostResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn create_post(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_blog_post(&payload)?;

    let new_post = blog_post::ActiveModel {
        title: Set(payload.title),
        content: Set(payload.content),
        tags: Set(payload.tags),
        media_gallery: Set(serde_json::Value::Array(Vec::new())),
        ranking: Set(0),
        design_config: Set(payload.design_config),
        owner_id: Set(auth_user.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_post.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(BlogPostResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/blog",
    tag = "Blog",
    operation_id = "listBlogFeed",
    summary = "Public blog feed",
    description = "No credential required. All posts, highest ranking first.",
    params(ListQuery),
    responses(
        (status = 200, description = "Posts by ranking, descending", body = [BlogPostResponse]),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_feed(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BlogPostResponse>>, AppError> {
    let posts = blog_post::Entity::find()
        .order_by_desc(blog_post::Column::Ranking)
        .order_by_asc(blog_post::Column::Id)
        .offset(Some(query.offset()))
        .limit(Some(query.limit()))
        .all(&state.db)
        .await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/blog/my",
    tag = "Blog",
    operation_id = "listMyBlogPosts",
    summary = "List the caller's own posts",
    params(ListQuery),
    responses(
        (status = 200, description = "Caller's posts, oldest first", body = [BlogPostResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_my_posts(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BlogPostResponse>>, AppError> {
    let posts = blog_post::Entity::find()
        .filter(blog_post::Column::OwnerId.eq(auth_user.user_id))
        .order_by_asc(blog_post::Column::Id)
        .offset(Some(query.offset()))
        .limit(Some(query.limit()))
        .all(&state.db)
        .await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/blog/{id}",
    tag = "Blog",
    operation_id = "getBlogPost",
    summary = "Get a blog post",
    description = "Posts are public; no credential required.",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = BlogPostResponse),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogPostResponse>, AppError> {
    let model = blog_post::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/blog/{id}",
    tag = "Blog",
    operation_id = "updateBlogPost",
    summary = "Update a blog post",
    description = "Partial update: absent fields are left untouched. \
        `tags: null` and `design_config: null` clear the stored values.",
    params(("id" = i32, Path, description = "Post ID")),
    request_body = UpdateBlogPostRequest,
    responses(
        (status = 200, description = "Post updated", body = BlogPostResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, user_id = auth_user.user_id))]
pub async fn update_post(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateBlogPostRequest>,
) -> Result<Json<BlogPostResponse>, AppError> {
    validate_update_blog_post(&payload)?;

    let existing = find_post(&state.db, id, auth_user.user_id).await?;
    let mut active: blog_post::ActiveModel = existing.into();

    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    if let Some(tags) = payload.tags {
        active.tags = Set(tags);
    }
    if let Some(design_config) = payload.design_config {
        active.design_config = Set(design_config);
    }

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/blog/{id}",
    tag = "Blog",
    operation_id = "deleteBlogPost",
    summary = "Delete a blog post",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn delete_post(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = blog_post::Entity::delete_many()
        .filter(blog_post::Column::Id.eq(id))
        .filter(blog_post::Column::OwnerId.eq(auth_user.user_id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Blog post not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/blog/{id}/media",
    tag = "Blog",
    operation_id = "uploadBlogMedia",
    summary = "Append media files to a blog post's gallery",
    description = "Accepts one or more multipart file fields. All files succeed \
        or none do. Returns the full gallery after the append.",
    params(("id" = i32, Path, description = "Post ID")),
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
    let existing = find_post(&state.db, id, auth_user.user_id).await?;

    let stored = store_media_fields(&mut multipart, &*state.media, "blog", &id.to_string()).await?;

    let gallery = appended_gallery(&existing.media_gallery, &stored);
    let mut active: blog_post::ActiveModel = existing.into();
    active.media_gallery = Set(gallery.clone());
    active.update(&state.db).await?;

    Ok(Json(GalleryResponse {
        media_gallery: crate::entity::gallery::gallery_entries(&gallery),
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/blog/{id}/rank",
    tag = "Blog",
    operation_id = "rankBlogPost",
    summary = "Adjust a post's ranking by a signed delta",
    description = "Open to any authenticated user, not just the author; this is \
        the public voting mechanic behind the feed order. The increment is \
        applied atomically in the database.",
    params(("id" = i32, Path, description = "Post ID")),
    request_body = RankRequest,
    responses(
        (status = 200, description = "Post with updated ranking", body = BlogPostResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, user_id = auth_user.user_id))]
pub async fn rank_post(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<RankRequest>,
) -> Result<Json<BlogPostResponse>, AppError> {
    let result = blog_post::Entity::update_many()
        .col_expr(
            blog_post::Column::Ranking,
            Expr::col(blog_post::Column::Ranking).add(payload.rank_delta),
        )
        .filter(blog_post::Column::Id.eq(id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Blog post not found".into()));
    }

    let model = blog_post::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))?;

    Ok(Json(model.into()))
}

async fn find_post<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: i32,
    owner_id: i32,
) -> Result<blog_post::Model, AppError> {
    blog_post::Entity::find_by_id(id)
        .filter(blog_post::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
}
