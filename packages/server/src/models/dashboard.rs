use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of the dashboard's recent-activity feed.
#[derive(Clone, Serialize, utoipa::ToSchema)]
pub struct RecentActivity {
    /// Either "journal" or "blog".
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DashboardStats {
    pub journal_count: u64,
    pub blog_count: u64,
    pub album_count: u64,
    /// Caller's album bytes in MiB, rounded to two decimals.
    pub storage_used_mb: f64,
    pub recent_activity: Vec<RecentActivity>,
}

pub const RECENT_ACTIVITY_LIMIT: usize = 8;

/// Merge the newest journals and blogs into one feed: journals first, then a
/// stable sort by `created_at` descending, truncated to the feed limit.
/// Stability means a journal and a blog with the same timestamp keep the
/// journal first.
pub fn merge_recent(
    journals: Vec<RecentActivity>,
    blogs: Vec<RecentActivity>,
) -> Vec<RecentActivity> {
    let mut merged = journals;
    merged.extend(blogs);
    merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    merged.truncate(RECENT_ACTIVITY_LIMIT);
    merged
}

/// Convert an album byte total to MiB with two-decimal rounding.
pub fn storage_used_mb(bytes: i64) -> f64 {
    (bytes as f64 / 1_048_576.0 * 100.0).round() / 100.0
}
