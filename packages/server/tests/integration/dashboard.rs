use crate::common::{TestApp, routes};

#[tokio::test]
async fn stats_require_a_token() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::DASHBOARD_STATS).await;

    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn counts_are_scoped_to_the_caller() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("keeper", "securepass").await;
    let other = app.create_authenticated_user("stranger", "securepass").await;

    app.create_journal_entry(&token, "mine 1").await;
    app.create_journal_entry(&token, "mine 2").await;
    app.create_blog_post(&token, "my post").await;
    app.upload_album_file(&token, "pic.png", b"bytes".to_vec(), false)
        .await;

    app.create_journal_entry(&other, "not mine").await;
    app.upload_album_file(&other, "other.png", b"other".to_vec(), false)
        .await;

    let res = app.get_with_token(routes::DASHBOARD_STATS, &token).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["journal_count"], 2);
    assert_eq!(res.body["blog_count"], 1);
    assert_eq!(res.body["album_count"], 1);
}

#[tokio::test]
async fn storage_used_reflects_the_callers_album_bytes() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("keeper", "securepass").await;

    // Half a mebibyte, which rounds to exactly 0.5 MB in the response.
    app.upload_album_file(&token, "half.png", vec![0u8; 524_288], false)
        .await;

    let res = app.get_with_token(routes::DASHBOARD_STATS, &token).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["storage_used_mb"], 0.5);
}

#[tokio::test]
async fn empty_account_reports_zeroes() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("newbie", "securepass").await;

    let res = app.get_with_token(routes::DASHBOARD_STATS, &token).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["journal_count"], 0);
    assert_eq!(res.body["blog_count"], 0);
    assert_eq!(res.body["album_count"], 0);
    assert_eq!(res.body["storage_used_mb"], 0.0);
    assert_eq!(res.body["recent_activity"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn recent_activity_merges_journals_and_blogs_newest_first() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("keeper", "securepass").await;

    for i in 0..5 {
        app.create_journal_entry(&token, &format!("journal {i}"))
            .await;
    }
    for i in 0..5 {
        app.create_blog_post(&token, &format!("post {i}")).await;
    }

    let res = app.get_with_token(routes::DASHBOARD_STATS, &token).await;

    assert_eq!(res.status, 200);
    let activity = res.body["recent_activity"].as_array().unwrap();
    assert_eq!(activity.len(), 8, "feed is capped at eight items");

    for item in activity {
        let kind = item["type"].as_str().unwrap();
        assert!(kind == "journal" || kind == "blog", "unexpected type {kind}");
        assert!(item["id"].is_number());
        assert!(item["title"].is_string());
    }

    // Timestamps never increase as we walk down the feed.
    let stamps: Vec<chrono::DateTime<chrono::FixedOffset>> = activity
        .iter()
        .map(|item| {
            chrono::DateTime::parse_from_rfc3339(item["created_at"].as_str().unwrap()).unwrap()
        })
        .collect();
    for pair in stamps.windows(2) {
        assert!(pair[0] >= pair[1], "{} before {}", pair[0], pair[1]);
    }
}
