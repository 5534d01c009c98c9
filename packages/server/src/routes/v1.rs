use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/journal", journal_routes())
        .nest("/album", album_routes())
        .nest("/blog", blog_routes())
        .nest("/profile", profile_routes())
        .nest("/dashboard", dashboard_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me))
}

fn journal_routes() -> Router<AppState> {
    let crud = Router::new()
        .route(
            "/",
            get(handlers::journal::list_entries).post(handlers::journal::create_entry),
        )
        .route(
            "/{id}",
            get(handlers::journal::get_entry)
                .put(handlers::journal::update_entry)
                .delete(handlers::journal::delete_entry),
        );

    let media = Router::new()
        .route("/{id}/media", post(handlers::journal::upload_media))
        .layer(handlers::journal::media_body_limit());

    crud.merge(media)
}

fn album_routes() -> Router<AppState> {
    let crud = Router::new()
        .route("/", get(handlers::album::list_items))
        .route("/public", get(handlers::album::list_public_items))
        .route(
            "/{id}",
            get(handlers::album::get_item)
                .put(handlers::album::update_item)
                .delete(handlers::album::delete_item),
        );

    let upload = Router::new()
        .route("/upload", post(handlers::album::upload_item))
        .layer(handlers::album::upload_body_limit());

    crud.merge(upload)
}

fn blog_routes() -> Router<AppState> {
    let crud = Router::new()
        .route(
            "/",
            get(handlers::blog::list_feed).post(handlers::blog::create_post),
        )
        .route("/my", get(handlers::blog::list_my_posts))
        .route(
            "/{id}",
            get(handlers::blog::get_post)
                .put(handlers::blog::update_post)
                .delete(handlers::blog::delete_post),
        )
        .route("/{id}/rank", put(handlers::blog::rank_post));

    let media = Router::new()
        .route("/{id}/media", post(handlers::blog::upload_media))
        .layer(handlers::blog::media_body_limit());

    crud.merge(media)
}

fn profile_routes() -> Router<AppState> {
    let crud = Router::new()
        .route("/", get(handlers::profile::get_profile))
        .route("/me", get(handlers::profile::get_me))
        .route("/section", post(handlers::profile::create_section))
        .route(
            "/section/{id}",
            put(handlers::profile::update_section).delete(handlers::profile::delete_section),
        )
        .route("/theme", put(handlers::profile::update_theme))
        .route("/reorder", put(handlers::profile::reorder_sections));

    let media = Router::new()
        .route(
            "/section/{id}/media",
            post(handlers::profile::upload_section_media),
        )
        .route("/picture", post(handlers::profile::upload_picture))
        .layer(handlers::profile::media_body_limit());

    crud.merge(media)
}

fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/stats", get(handlers::dashboard::get_stats))
}
