//! Credential storage layer

pub mod memory_repo;
pub mod subject_repo;

pub use memory_repo::InMemoryCredentialStore;
pub use subject_repo::PgCredentialStore;

use crate::{
    error::AppError,
    models::{NewSubject, SubjectId, SubjectRecord},
};
use async_trait::async_trait;

/// Backend liveness as seen by the readiness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Persists subjects keyed by a unique login identity.
///
/// Retries and timeouts are the implementation's business; the auth service
/// never retries a failed call.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new subject and return its id.
    ///
    /// Fails with `AppError::DuplicateIdentity` when the login identity is taken.
    async fn insert(&self, subject: &NewSubject) -> Result<SubjectId, AppError>;

    /// Look up a subject by login identity; `None` when it does not exist.
    async fn find_by_login(&self, login_identity: &str) -> Result<Option<SubjectRecord>, AppError>;

    /// Backend liveness, used by the readiness probe.
    async fn health_check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
