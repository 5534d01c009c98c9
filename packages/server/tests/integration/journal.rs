use serde_json::json;

use crate::common::{TestApp, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn create_returns_the_persisted_entry() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;

        let res = app
            .post_with_token(
                routes::JOURNAL,
                &json!({
                    "title": "First entry",
                    "content": "Dear diary",
                    "is_public": true,
                    "design_config": {"font": "serif"},
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["title"], "First entry");
        assert_eq!(res.body["is_public"], true);
        assert_eq!(res.body["design_config"]["font"], "serif");
        assert_eq!(res.body["media_gallery"], json!([]));
        assert!(res.body["created_at"].is_string());
    }

    #[tokio::test]
    async fn list_returns_only_the_callers_entries_oldest_first() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        let other = app.create_authenticated_user("other", "securepass").await;

        let first = app.create_journal_entry(&token, "one").await;
        let second = app.create_journal_entry(&token, "two").await;
        app.create_journal_entry(&other, "not mine").await;

        let res = app.get_with_token(routes::JOURNAL, &token).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"].as_i64().unwrap() as i32, first);
        assert_eq!(items[1]["id"].as_i64().unwrap() as i32, second);
    }

    #[tokio::test]
    async fn list_respects_offset_and_limit() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        for i in 0..5 {
            app.create_journal_entry(&token, &format!("entry {i}")).await;
        }

        let res = app
            .get_with_token(&format!("{}?offset=1&limit=2", routes::JOURNAL), &token)
            .await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "entry 1");
        assert_eq!(items[1]["title"], "entry 2");
    }

    #[tokio::test]
    async fn another_users_entry_reads_as_not_found() {
        let app = TestApp::spawn().await;
        let owner = app.create_authenticated_user("owner", "securepass").await;
        let intruder = app.create_authenticated_user("intruder", "securepass").await;
        let id = app.create_journal_entry(&owner, "private").await;

        let get = app.get_with_token(&routes::journal(id), &intruder).await;
        assert_eq!(get.status, 404);
        assert_eq!(get.error_code(), "NOT_FOUND");

        let update = app
            .put_with_token(&routes::journal(id), &json!({"title": "hijack"}), &intruder)
            .await;
        assert_eq!(update.status, 404);

        let delete = app.delete_with_token(&routes::journal(id), &intruder).await;
        assert_eq!(delete.status, 404);

        // Owner still sees the untouched entry.
        let check = app.get_with_token(&routes::journal(id), &owner).await;
        assert_eq!(check.status, 200);
        assert_eq!(check.body["title"], "private");
    }

    #[tokio::test]
    async fn update_only_touches_provided_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        let id = app.create_journal_entry(&token, "original").await;

        let res = app
            .put_with_token(&routes::journal(id), &json!({"is_public": true}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "original");
        assert_eq!(res.body["is_public"], true);
    }

    #[tokio::test]
    async fn design_config_can_be_set_and_cleared() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        let id = app.create_journal_entry(&token, "styled").await;

        let set = app
            .put_with_token(
                &routes::journal(id),
                &json!({"design_config": {"layout": "grid"}}),
                &token,
            )
            .await;
        assert_eq!(set.status, 200);
        assert_eq!(set.body["design_config"]["layout"], "grid");

        let cleared = app
            .put_with_token(&routes::journal(id), &json!({"design_config": null}), &token)
            .await;
        assert_eq!(cleared.status, 200);
        assert!(cleared.body["design_config"].is_null());
    }

    #[tokio::test]
    async fn delete_removes_the_entry() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        let id = app.create_journal_entry(&token, "short-lived").await;

        let res = app.delete_with_token(&routes::journal(id), &token).await;
        assert_eq!(res.status, 204);

        let gone = app.get_with_token(&routes::journal(id), &token).await;
        assert_eq!(gone.status, 404);
    }

    #[tokio::test]
    async fn padded_title_is_stored_verbatim() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;

        let res = app
            .post_with_token(
                routes::JOURNAL,
                &json!({"title": "  spaced out  ", "content": "body"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 201);
        assert_eq!(res.body["title"], "  spaced out  ");

        let updated = app
            .put_with_token(
                &routes::journal(res.id()),
                &json!({"title": " still padded "}),
                &token,
            )
            .await;
        assert_eq!(updated.status, 200);
        assert_eq!(updated.body["title"], " still padded ");
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;

        let res = app
            .post_with_token(
                routes::JOURNAL,
                &json!({"title": "   ", "content": "body"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }
}

mod media {
    use super::*;

    #[tokio::test]
    async fn upload_appends_in_order_and_classifies_by_content_type() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        let id = app.create_journal_entry(&token, "with media").await;

        let res = app
            .upload_media_with_token(
                &routes::journal_media(id),
                &[
                    ("photo.png", "image/png", b"png bytes".to_vec()),
                    ("clip.mp4", "video/mp4", b"mp4 bytes".to_vec()),
                ],
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let gallery = res.body["media_gallery"].as_array().unwrap();
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery[0]["type"], "image");
        assert!(gallery[0]["url"].as_str().unwrap().ends_with("photo.png"));
        assert_eq!(gallery[1]["type"], "video");
        assert!(gallery[1]["url"].as_str().unwrap().ends_with("clip.mp4"));
    }

    #[tokio::test]
    async fn second_upload_appends_after_existing_entries() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        let id = app.create_journal_entry(&token, "growing gallery").await;

        app.upload_media_with_token(
            &routes::journal_media(id),
            &[("a.png", "image/png", b"a".to_vec())],
            &token,
        )
        .await;

        let res = app
            .upload_media_with_token(
                &routes::journal_media(id),
                &[("b.png", "image/png", b"b".to_vec())],
                &token,
            )
            .await;

        let gallery = res.body["media_gallery"].as_array().unwrap();
        assert_eq!(gallery.len(), 2);
        assert!(gallery[0]["url"].as_str().unwrap().ends_with("a.png"));
        assert!(gallery[1]["url"].as_str().unwrap().ends_with("b.png"));
    }

    #[tokio::test]
    async fn same_filename_twice_yields_distinct_urls() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        let id = app.create_journal_entry(&token, "dup names").await;

        app.upload_media_with_token(
            &routes::journal_media(id),
            &[("cat.png", "image/png", b"first".to_vec())],
            &token,
        )
        .await;
        let res = app
            .upload_media_with_token(
                &routes::journal_media(id),
                &[("cat.png", "image/png", b"second".to_vec())],
                &token,
            )
            .await;

        let gallery = res.body["media_gallery"].as_array().unwrap();
        assert_eq!(gallery.len(), 2);
        assert_ne!(gallery[0]["url"], gallery[1]["url"]);
    }

    #[tokio::test]
    async fn upload_to_missing_entry_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;

        let res = app
            .upload_media_with_token(
                &routes::journal_media(999_999),
                &[("x.png", "image/png", b"x".to_vec())],
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn traversal_filename_fails_whole_batch() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        let id = app.create_journal_entry(&token, "attack").await;

        let res = app
            .upload_media_with_token(
                &routes::journal_media(id),
                &[
                    ("ok.png", "image/png", b"fine".to_vec()),
                    ("../../etc/evil.png", "image/png", b"bad".to_vec()),
                ],
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");

        // Gallery must be untouched by the failed batch.
        let check = app.get_with_token(&routes::journal(id), &token).await;
        assert_eq!(check.body["media_gallery"], json!([]));
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("writer", "securepass").await;
        let id = app.create_journal_entry(&token, "nothing").await;

        let res = app
            .upload_media_with_token(&routes::journal_media(id), &[], &token)
            .await;

        assert_eq!(res.status, 400);
    }
}
