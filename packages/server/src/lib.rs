pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Haven API",
        version = "1.0.0",
        description = "Personal content backend: journal, album, blog and profile"
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::journal::create_entry,
        handlers::journal::list_entries,
        handlers::journal::get_entry,
        handlers::journal::update_entry,
        handlers::journal::delete_entry,
        handlers::journal::upload_media,
        handlers::album::upload_item,
        handlers::album::list_items,
        handlers::album::list_public_items,
        handlers::album::get_item,
        handlers::album::update_item,
        handlers::album::delete_item,
        handlers::blog::create_post,
        handlers::blog::list_feed,
        handlers::blog::list_my_posts,
        handlers::blog::get_post,
        handlers::blog::update_post,
        handlers::blog::delete_post,
        handlers::blog::upload_media,
        handlers::blog::rank_post,
        handlers::profile::get_profile,
        handlers::profile::get_me,
        handlers::profile::create_section,
        handlers::profile::update_section,
        handlers::profile::delete_section,
        handlers::profile::upload_section_media,
        handlers::profile::upload_picture,
        handlers::profile::update_theme,
        handlers::profile::reorder_sections,
        handlers::dashboard::get_stats,
    ),
    tags(
        (name = "Auth", description = "Registration, login and token handling"),
        (name = "Journal", description = "Private journal entries"),
        (name = "Album", description = "Photo and video uploads with a storage quota"),
        (name = "Blog", description = "Public posts with a ranking feed"),
        (name = "Profile", description = "Profile sections, picture and theme"),
        (name = "Dashboard", description = "Aggregated stats and recent activity"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let api = ApiDoc::openapi();

    axum::Router::new()
        .nest("/api", routes::api_routes(&state.config))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
