use std::sync::Arc;

use common::storage::filesystem::FilesystemMediaStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::database::init_db;
use server::state::AppState;

/// Subdirectories created under the uploads root at startup. Album files
/// live at the root itself.
const MEDIA_SUBDIRS: &[&str] = &["journal", "blog", "profile"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;

    let media = FilesystemMediaStore::new(
        config.storage.uploads_dir.clone(),
        MEDIA_SUBDIRS,
        config.storage.max_upload_size,
    )
    .await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        db,
        config,
        media: Arc::new(media),
    };

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
