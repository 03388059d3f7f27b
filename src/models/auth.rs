//! Authentication-related request/response models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::SubjectId;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    #[validate(length(max = 64, message = "username must be at most 64 characters"))]
    pub username: Option<String>,
}

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub subject_id: SubjectId,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email must not be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64, // seconds until the token expires
}

/// Current subject response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub subject_id: SubjectId,
}
