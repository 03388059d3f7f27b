//! Subject repository (数据库访问层)

use super::{CredentialStore, HealthStatus};
use crate::{
    config::DatabaseConfig,
    error::AppError,
    models::{NewSubject, SubjectId, SubjectRecord},
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use uuid::Uuid;

/// PostgreSQL 凭据存储
pub struct PgCredentialStore {
    db: PgPool,
}

impl PgCredentialStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 按配置建立连接池
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .test_before_acquire(true)
            .connect(config.url.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect credential store: {}", e);
                AppError::Storage(format!("Connection failed: {}", e))
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Credential store connected"
        );

        Ok(Self::new(pool))
    }

    /// 创建或升级 subjects 表
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Storage(format!("Migration failed: {}", e))
            })?;

        tracing::info!("Credential store migrations applied");
        Ok(())
    }

    fn record_pool_metrics(&self) {
        metrics::gauge!("credential_store.pool.size").set(self.db.size() as f64);
        metrics::gauge!("credential_store.pool.idle").set(self.db.num_idle() as f64);
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    /// 创建主体
    async fn insert(&self, subject: &NewSubject) -> Result<SubjectId, AppError> {
        let id: SubjectId = sqlx::query_scalar(
            r#"
            INSERT INTO subjects (id, login_identity, username, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&subject.login_identity)
        .bind(&subject.username)
        .bind(&subject.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateIdentity;
                }
            }
            AppError::Database(e)
        })?;

        Ok(id)
    }

    /// 根据登录标识查找主体
    async fn find_by_login(&self, login_identity: &str) -> Result<Option<SubjectRecord>, AppError> {
        let record = sqlx::query_as::<_, SubjectRecord>(
            r#"
            SELECT id, login_identity, username, password_hash, created_at
            FROM subjects
            WHERE login_identity = $1
            "#,
        )
        .bind(login_identity)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    /// 就绪检查：subjects 表可读
    async fn health_check(&self) -> HealthStatus {
        self.record_pool_metrics();

        match sqlx::query("SELECT 1 FROM subjects LIMIT 1")
            .fetch_optional(&self.db)
            .await
        {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => {
                tracing::warn!("Credential store health check failed: {}", e);
                HealthStatus::Unhealthy(e.to_string())
            }
        }
    }
}
