//! 认证相关的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    handlers::ValidatedJson,
    middleware::AppState,
    models::{auth::*, Credential},
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = req.username.filter(|name| !name.trim().is_empty());

    let subject_id = state
        .auth_service
        .register(Credential::new(req.email, req.password), username)
        .await?;

    Ok(Json(RegisterResponse {
        message: "User created successfully".to_string(),
        subject_id,
    }))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .auth_service
        .login(Credential::new(req.email, req.password))
        .await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        token_type: "Bearer".to_string(),
        expires_in: outcome.expires_in,
    }))
}

/// 获取当前令牌对应的主体
pub async fn me(auth_context: AuthContext) -> Json<MeResponse> {
    Json(MeResponse {
        subject_id: auth_context.subject_id,
    })
}
