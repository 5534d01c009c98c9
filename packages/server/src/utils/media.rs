use axum::extract::Multipart;
use common::storage::MediaStore;
use uuid::Uuid;

use crate::entity::gallery::{MediaItem, MediaKind, gallery_entries, gallery_value};
use crate::error::AppError;
use crate::utils::filename::validate_upload_filename;

/// A file accepted from a multipart request and persisted to the media store.
pub struct StoredMedia {
    /// Logical path under the uploads root.
    pub path: String,
    pub kind: MediaKind,
    /// Exact byte length as received.
    pub size: u64,
}

/// Build a collision-free logical path for an upload.
///
/// The random suffix keeps the gallery-entry-to-file relation injective:
/// re-uploading a file with the same name never overwrites an earlier blob.
pub fn unique_media_path(subdir: &str, tag: &str, filename: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    let suffix = &uuid[..8];
    if subdir.is_empty() {
        format!("{tag}_{suffix}_{filename}")
    } else {
        format!("{subdir}/{tag}_{suffix}_{filename}")
    }
}

/// Drain all file fields from a multipart request into the media store.
///
/// Each file is classified from its client-declared content type and stored
/// under `subdir` with a `{tag}_{suffix}_` prefix. If any file fails, the
/// whole batch fails: files already stored for this batch are best-effort
/// deleted and the error is returned.
pub async fn store_media_fields(
    multipart: &mut Multipart,
    store: &dyn MediaStore,
    subdir: &str,
    tag: &str,
) -> Result<Vec<StoredMedia>, AppError> {
    let mut stored: Vec<StoredMedia> = Vec::new();

    let result = async {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let Some(file_name) = field.file_name().map(|s| s.to_string()) else {
                continue; // Ignore non-file fields.
            };

            let file_name = validate_upload_filename(&file_name)
                .map_err(|e| AppError::Validation(e.message().into()))?
                .to_string();

            let kind = MediaKind::from_content_type(field.content_type());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

            let path = unique_media_path(subdir, tag, &file_name);
            let size = store.put(&path, &data).await?;

            stored.push(StoredMedia { path, kind, size });
        }
        Ok(())
    }
    .await;

    if let Err(e) = result {
        for media in &stored {
            let _ = store.delete(&media.path).await;
        }
        return Err(e);
    }

    if stored.is_empty() {
        return Err(AppError::Validation("No file uploaded".into()));
    }

    Ok(stored)
}

/// Append stored uploads to a gallery column value.
///
/// Read-modify-write of the whole array; concurrent appends to the same
/// parent are last-write-wins (known race, documented behavior).
pub fn appended_gallery(current: &serde_json::Value, uploads: &[StoredMedia]) -> serde_json::Value {
    let mut entries = gallery_entries(current);
    entries.extend(uploads.iter().map(|m| MediaItem {
        url: m.path.clone(),
        kind: m.kind,
    }));
    gallery_value(&entries)
}
