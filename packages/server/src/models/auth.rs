use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "morgan")]
    pub username: String,
    #[schema(example = "morgan@example.com")]
    pub email: String,
    #[schema(example = "correct horse battery")]
    pub password: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub profile_theme: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(m: crate::entity::user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            profile_picture: m.profile_picture,
            profile_theme: m.profile_theme,
            created_at: m.created_at,
        }
    }
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), AppError> {
    let username = req.username.trim();
    if username.len() < 3 || username.len() > 32 {
        return Err(AppError::Validation(
            "Username must be 3-32 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::Validation(
            "Username may only contain letters, digits, '_' and '-'".into(),
        ));
    }
    let email = req.email.trim();
    if !email.contains('@') || email.len() > 254 {
        return Err(AppError::Validation("Invalid email address".into()));
    }
    if req.password.len() < 8 || req.password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}
