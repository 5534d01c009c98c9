use serde_json::json;

use crate::common::{TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register_with_valid_credentials() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "username": "alice",
                    "email": "alice@example.com",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["username"], "alice");
        assert_eq!(res.body["email"], "alice@example.com");
        assert!(res.body["password"].is_null(), "hash must not leak");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("bob", "securepass").await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "username": "bob",
                    "email": "other@example.com",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.error_code(), "USERNAME_TAKEN");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("carol", "securepass").await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "username": "carol2",
                    "email": "carol@example.com",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.error_code(), "CONFLICT");
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "username": "dave",
                    "email": "dave@example.com",
                    "password": "short",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "username": "erin",
                    "email": "not-an-email",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn valid_credentials_return_a_token() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("frank", "securepass").await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "frank", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["token"].is_string());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("grace", "securepass").await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "grace", "password": "wrongwrong"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.error_code(), "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_user_gets_the_same_error_as_wrong_password() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "nobody", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.error_code(), "INVALID_CREDENTIALS");
    }
}

mod me {
    use super::*;

    #[tokio::test]
    async fn returns_account_details_for_valid_token() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("heidi", "securepass").await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["username"], "heidi");
        assert_eq!(res.body["email"], "heidi@example.com");
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.error_code(), "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not.a.valid.token").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.error_code(), "TOKEN_INVALID");
    }
}
