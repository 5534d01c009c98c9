use serde_json::json;

use crate::common::{TestApp, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn create_starts_with_zero_ranking() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("author", "securepass").await;

        let res = app
            .post_with_token(
                routes::BLOG,
                &json!({
                    "title": "Hello world",
                    "content": "My first post",
                    "tags": "intro,meta",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["ranking"], 0);
        assert_eq!(res.body["tags"], "intro,meta");
        assert_eq!(res.body["media_gallery"], json!([]));
    }

    #[tokio::test]
    async fn posts_are_readable_without_a_token() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("author", "securepass").await;
        let id = app.create_blog_post(&token, "open to all").await;

        let res = app.get_without_token(&routes::blog(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "open to all");
    }

    #[tokio::test]
    async fn my_listing_excludes_other_authors() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("author", "securepass").await;
        let other = app.create_authenticated_user("rival", "securepass").await;

        app.create_blog_post(&token, "mine").await;
        app.create_blog_post(&other, "theirs").await;

        let res = app.get_with_token(routes::BLOG_MY, &token).await;

        assert_eq!(res.status, 200);
        let posts = res.body.as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["title"], "mine");
    }

    #[tokio::test]
    async fn update_and_delete_are_owner_scoped() {
        let app = TestApp::spawn().await;
        let owner = app.create_authenticated_user("author", "securepass").await;
        let intruder = app.create_authenticated_user("rival", "securepass").await;
        let id = app.create_blog_post(&owner, "guarded").await;

        let update = app
            .put_with_token(&routes::blog(id), &json!({"title": "hijack"}), &intruder)
            .await;
        assert_eq!(update.status, 404);

        let delete = app.delete_with_token(&routes::blog(id), &intruder).await;
        assert_eq!(delete.status, 404);

        let own_delete = app.delete_with_token(&routes::blog(id), &owner).await;
        assert_eq!(own_delete.status, 204);
    }

    #[tokio::test]
    async fn tags_can_be_cleared_with_null() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("author", "securepass").await;
        let id = app.create_blog_post(&token, "tagged").await;

        let res = app
            .put_with_token(&routes::blog(id), &json!({"tags": null}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["tags"].is_null());
    }
}

mod ranking {
    use super::*;

    #[tokio::test]
    async fn feed_orders_by_ranking_descending() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("author", "securepass").await;

        let low = app.create_blog_post(&token, "low").await;
        let high = app.create_blog_post(&token, "high").await;

        app.put_with_token(&routes::blog_rank(high), &json!({"rank_delta": 5}), &token)
            .await;

        let res = app.get_without_token(routes::BLOG).await;

        assert_eq!(res.status, 200);
        let posts = res.body.as_array().unwrap();
        assert_eq!(posts[0]["id"].as_i64().unwrap() as i32, high);
        assert_eq!(posts[1]["id"].as_i64().unwrap() as i32, low);
    }

    #[tokio::test]
    async fn any_authenticated_user_can_vote() {
        let app = TestApp::spawn().await;
        let author = app.create_authenticated_user("author", "securepass").await;
        let reader = app.create_authenticated_user("reader", "securepass").await;
        let id = app.create_blog_post(&author, "votable").await;

        let up = app
            .put_with_token(&routes::blog_rank(id), &json!({"rank_delta": 3}), &reader)
            .await;
        assert_eq!(up.status, 200);
        assert_eq!(up.body["ranking"], 3);

        let down = app
            .put_with_token(&routes::blog_rank(id), &json!({"rank_delta": -5}), &reader)
            .await;
        assert_eq!(down.status, 200);
        assert_eq!(down.body["ranking"], -2, "ranking may go negative");
    }

    #[tokio::test]
    async fn voting_requires_a_token() {
        let app = TestApp::spawn().await;
        let author = app.create_authenticated_user("author", "securepass").await;
        let id = app.create_blog_post(&author, "votable").await;

        let res = app
            .client
            .put(format!("http://{}{}", app.addr, routes::blog_rank(id)))
            .json(&json!({"rank_delta": 1}))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn ranking_a_missing_post_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("reader", "securepass").await;

        let res = app
            .put_with_token(
                &routes::blog_rank(999_999),
                &json!({"rank_delta": 1}),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod media {
    use super::*;

    #[tokio::test]
    async fn gallery_append_works_like_journal() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("author", "securepass").await;
        let id = app.create_blog_post(&token, "illustrated").await;

        let res = app
            .upload_media_with_token(
                &routes::blog_media(id),
                &[
                    ("cover.png", "image/png", b"cover".to_vec()),
                    ("teaser.webm", "video/webm", b"teaser".to_vec()),
                ],
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let gallery = res.body["media_gallery"].as_array().unwrap();
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery[0]["type"], "image");
        assert_eq!(gallery[1]["type"], "video");
    }

    #[tokio::test]
    async fn gallery_append_is_owner_scoped() {
        let app = TestApp::spawn().await;
        let owner = app.create_authenticated_user("author", "securepass").await;
        let intruder = app.create_authenticated_user("rival", "securepass").await;
        let id = app.create_blog_post(&owner, "guarded").await;

        let res = app
            .upload_media_with_token(
                &routes::blog_media(id),
                &[("x.png", "image/png", b"x".to_vec())],
                &intruder,
            )
            .await;

        assert_eq!(res.status, 404);
    }
}
