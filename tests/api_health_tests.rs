//! 健康检查 API 集成测试

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use gatekeeper::{
    error::AppError,
    middleware::AppState,
    models::{NewSubject, SubjectId, SubjectRecord},
    repository::{CredentialStore, HealthStatus},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{create_auth_service_with_store, create_test_app_state, create_test_config};

/// 数据库不可达时的存储
struct UnreachableStore;

#[async_trait]
impl CredentialStore for UnreachableStore {
    async fn insert(&self, _subject: &NewSubject) -> Result<SubjectId, AppError> {
        Err(AppError::Storage("unreachable".to_string()))
    }

    async fn find_by_login(&self, _login_identity: &str) -> Result<Option<SubjectRecord>, AppError> {
        Err(AppError::Storage("unreachable".to_string()))
    }

    async fn health_check(&self) -> HealthStatus {
        HealthStatus::Unhealthy("connection refused".to_string())
    }
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = gatekeeper::routes::create_router(create_test_app_state());

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["uptime_secs"].is_u64());
}

#[tokio::test]
async fn test_ready_endpoint_reports_store() {
    let app = gatekeeper::routes::create_router(create_test_app_state());

    let (status, json) = get_json(app, "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ready"], true);
    assert_eq!(json["checks"][0]["name"], "credential_store");
    assert_eq!(json["checks"][0]["status"], "healthy");
    assert!(json["checks"][0].get("message").is_none());
}

#[tokio::test]
async fn test_ready_endpoint_unavailable_when_store_down() {
    let state = Arc::new(AppState {
        config: create_test_config(),
        auth_service: create_auth_service_with_store(Arc::new(UnreachableStore)),
    });
    let app = gatekeeper::routes::create_router(state);

    let (status, json) = get_json(app, "/ready").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["ready"], false);
    assert_eq!(json["checks"][0]["status"], "unhealthy");
    assert_eq!(json["checks"][0]["message"], "connection refused");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = gatekeeper::routes::create_router(create_test_app_state());

    // 未注册路径不经过令牌校验
    for uri in ["/nonexistent", "/registr", "/api/v1/auth/other"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}
