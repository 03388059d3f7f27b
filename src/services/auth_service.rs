//! 认证服务：注册、登录、令牌校验

use crate::{
    auth::{jwt::TokenIssuer, password::PasswordHasher},
    error::AppError,
    models::{Credential, NewSubject, SubjectId},
    repository::CredentialStore,
};
use std::sync::Arc;

/// 未知账号时用于比对的占位密码，使两种失败路径耗时相近
const DUMMY_PASSWORD: &str = "gatekeeper-timing-equalizer";

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub subject_id: SubjectId,
    /// 令牌剩余有效期（秒）
    pub expires_in: u64,
}

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
    dummy_hash: String,
}

impl AuthService {
    /// 构造时计算占位哈希
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            store,
            hasher,
            issuer,
            dummy_hash,
        })
    }

    /// 注册新主体
    pub async fn register(
        &self,
        credential: Credential,
        username: Option<String>,
    ) -> Result<SubjectId, AppError> {
        let login_identity = validate_credential(&credential)?.to_string();

        let password_hash = self.hash_password(credential.password).await?;

        let subject_id = self
            .store
            .insert(&NewSubject {
                login_identity,
                username,
                password_hash,
            })
            .await
            .map_err(|e| {
                if matches!(e, AppError::DuplicateIdentity) {
                    tracing::info!("Registration rejected: login identity already registered");
                }
                e
            })?;

        metrics::counter!("auth.register.success").increment(1);
        tracing::info!(%subject_id, "Subject registered");

        Ok(subject_id)
    }

    /// 登录：校验密码并签发访问令牌
    pub async fn login(&self, credential: Credential) -> Result<LoginOutcome, AppError> {
        let login_identity = validate_credential(&credential)?;

        let record = match self.store.find_by_login(login_identity).await? {
            Some(record) => record,
            None => {
                // 未知账号同样执行一次哈希比对
                let _ = self
                    .verify_password(credential.password, self.dummy_hash.clone())
                    .await;
                return Err(self.reject_login());
            }
        };

        let matches = self
            .verify_password(credential.password, record.password_hash)
            .await?;

        if !matches {
            return Err(self.reject_login());
        }

        let token = self.issuer.issue(record.id)?;

        metrics::counter!("auth.login.success").increment(1);
        tracing::info!(subject_id = %record.id, "Login succeeded");

        Ok(LoginOutcome {
            token,
            subject_id: record.id,
            expires_in: self.issuer.validity().as_secs(),
        })
    }

    /// 校验访问令牌，返回主体 ID
    pub fn authenticate(&self, token: &str) -> Result<SubjectId, AppError> {
        self.issuer.verify(token)
    }

    /// 就绪检查：凭据存储是否可用
    pub async fn store_health(&self) -> crate::repository::HealthStatus {
        self.store.health_check().await
    }

    fn reject_login(&self) -> AppError {
        metrics::counter!("auth.login.failure").increment(1);
        tracing::info!("Login rejected: invalid credentials");
        AppError::InvalidCredentials
    }

    /// Argon2 是 CPU 密集型操作，放到阻塞线程池执行
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Hashing(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Hashing(format!("Verification task failed: {}", e)))?
    }
}

/// 拒绝空的登录标识或密码，返回去除首尾空白后的登录标识
fn validate_credential(credential: &Credential) -> Result<&str, AppError> {
    let login_identity = credential.login_identity.trim();

    if login_identity.is_empty() {
        return Err(AppError::invalid_input("login identity must not be empty"));
    }

    if credential.password.is_empty() {
        return Err(AppError::invalid_input("password must not be empty"));
    }

    Ok(login_identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credential() {
        assert_eq!(
            validate_credential(&Credential::new("  alice@example.com ", "pw")).unwrap(),
            "alice@example.com"
        );
        assert!(matches!(
            validate_credential(&Credential::new("   ", "pw")),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_credential(&Credential::new("alice@example.com", "")),
            Err(AppError::InvalidInput(_))
        ));
    }
}
