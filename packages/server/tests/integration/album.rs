use serde_json::json;

use crate::common::{TestApp, routes};

mod upload {
    use super::*;

    #[tokio::test]
    async fn upload_records_exact_size_and_media_type() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("snapper", "securepass").await;

        let res = app
            .upload_file_with_token(
                routes::ALBUM_UPLOAD,
                "sunset.png",
                "image/png",
                vec![1u8; 2048],
                &[],
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["file_size"], 2048);
        assert_eq!(res.body["media_type"], "image");
        assert_eq!(res.body["is_public"], false);
        assert!(res.body["file_path"].as_str().unwrap().ends_with("sunset.png"));
    }

    #[tokio::test]
    async fn video_content_type_is_classified_as_video() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("snapper", "securepass").await;

        let res = app
            .upload_file_with_token(
                routes::ALBUM_UPLOAD,
                "clip.mp4",
                "video/mp4",
                b"mp4 bytes".to_vec(),
                &[("is_public", "true")],
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["media_type"], "video");
        assert_eq!(res.body["is_public"], true);
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("snapper", "securepass").await;

        let res = app
            .post_with_token(routes::ALBUM_UPLOAD, &json!({}), &token)
            .await;

        // Not a multipart body at all.
        assert_eq!(res.status, 400);
    }
}

mod quota {
    use super::*;

    #[tokio::test]
    async fn upload_filling_the_quota_exactly_succeeds() {
        let app = TestApp::spawn_with_quota(100).await;
        let token = app.create_authenticated_user("hoarder", "securepass").await;

        app.upload_album_file(&token, "a.png", vec![0u8; 60], false)
            .await;

        let res = app
            .upload_file_with_token(
                routes::ALBUM_UPLOAD,
                "b.png",
                "image/png",
                vec![0u8; 40],
                &[],
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "boundary upload should fit: {}", res.text);
    }

    #[tokio::test]
    async fn upload_past_the_quota_is_rejected() {
        let app = TestApp::spawn_with_quota(100).await;
        let token = app.create_authenticated_user("hoarder", "securepass").await;

        app.upload_album_file(&token, "a.png", vec![0u8; 60], false)
            .await;

        let res = app
            .upload_file_with_token(
                routes::ALBUM_UPLOAD,
                "b.png",
                "image/png",
                vec![0u8; 41],
                &[],
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error_code(), "CAPACITY_EXCEEDED");
        assert!(res.body["message"].as_str().unwrap().contains("100 MiB"));
    }

    #[tokio::test]
    async fn quota_is_shared_across_users() {
        let app = TestApp::spawn_with_quota(100).await;
        let first = app.create_authenticated_user("one", "securepass").await;
        let second = app.create_authenticated_user("two", "securepass").await;

        app.upload_album_file(&first, "big.png", vec![0u8; 90], false)
            .await;

        let res = app
            .upload_file_with_token(
                routes::ALBUM_UPLOAD,
                "small.png",
                "image/png",
                vec![0u8; 20],
                &[],
                &second,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error_code(), "CAPACITY_EXCEEDED");
    }

    #[tokio::test]
    async fn deleting_an_item_frees_its_bytes() {
        let app = TestApp::spawn_with_quota(100).await;
        let token = app.create_authenticated_user("hoarder", "securepass").await;

        let id = app
            .upload_album_file(&token, "a.png", vec![0u8; 90], false)
            .await;

        let res = app.delete_with_token(&routes::album_item(id), &token).await;
        assert_eq!(res.status, 204);

        let retry = app
            .upload_file_with_token(
                routes::ALBUM_UPLOAD,
                "b.png",
                "image/png",
                vec![0u8; 90],
                &[],
                &token,
            )
            .await;
        assert_eq!(retry.status, 201, "{}", retry.text);
    }
}

mod visibility {
    use super::*;

    #[tokio::test]
    async fn public_listing_needs_no_token_and_hides_private_items() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("snapper", "securepass").await;

        let public_id = app
            .upload_album_file(&token, "shared.png", b"pub".to_vec(), true)
            .await;
        app.upload_album_file(&token, "secret.png", b"priv".to_vec(), false)
            .await;

        let res = app.get_without_token(routes::ALBUM_PUBLIC).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"].as_i64().unwrap() as i32, public_id);
    }

    #[tokio::test]
    async fn owner_listing_shows_private_and_public_items() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("snapper", "securepass").await;
        let other = app.create_authenticated_user("other", "securepass").await;

        app.upload_album_file(&token, "a.png", b"a".to_vec(), true)
            .await;
        app.upload_album_file(&token, "b.png", b"b".to_vec(), false)
            .await;
        app.upload_album_file(&other, "c.png", b"c".to_vec(), true)
            .await;

        let res = app.get_with_token(routes::ALBUM, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn visibility_and_design_can_be_updated() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("snapper", "securepass").await;
        let id = app
            .upload_album_file(&token, "a.png", b"a".to_vec(), false)
            .await;

        let res = app
            .put_with_token(
                &routes::album_item(id),
                &json!({"is_public": true, "design_config": {"frame": "none"}}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["is_public"], true);
        assert_eq!(res.body["design_config"]["frame"], "none");
    }

    #[tokio::test]
    async fn another_users_item_reads_as_not_found() {
        let app = TestApp::spawn().await;
        let owner = app.create_authenticated_user("owner", "securepass").await;
        let intruder = app.create_authenticated_user("intruder", "securepass").await;
        let id = app
            .upload_album_file(&owner, "mine.png", b"x".to_vec(), false)
            .await;

        let get = app.get_with_token(&routes::album_item(id), &intruder).await;
        assert_eq!(get.status, 404);

        let delete = app
            .delete_with_token(&routes::album_item(id), &intruder)
            .await;
        assert_eq!(delete.status, 404);
    }
}
