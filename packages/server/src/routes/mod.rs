mod v1;

use axum::Router;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::{AppConfig, CorsConfig};
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .nest("/v1", v1::routes())
        .layer(cors_layer(&config.server.cors))
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allow_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(cors.max_age))
}
