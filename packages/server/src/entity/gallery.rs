use serde::{Deserialize, Serialize};

/// Media classification for gallery entries and album items.
///
/// Derived from the client-declared content type: anything whose MIME type
/// starts with `video` is a video, everything else an image. No sniffing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.starts_with("video") => Self::Video,
            _ => Self::Image,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// A single gallery entry: `{url, type}`.
/// Stored as a JSON array element on the owning record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MediaItem {
    /// Logical path of the stored file under the uploads root.
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

/// Decode a gallery column into its entries. `null` decodes as empty.
pub fn gallery_entries(value: &serde_json::Value) -> Vec<MediaItem> {
    if value.is_null() {
        return Vec::new();
    }
    serde_json::from_value(value.clone()).unwrap_or_default()
}

/// Encode gallery entries back into the JSON column representation.
pub fn gallery_value(entries: &[MediaItem]) -> serde_json::Value {
    serde_json::to_value(entries).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
}
