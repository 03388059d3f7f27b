//! Subject domain models

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a registered subject
pub type SubjectId = Uuid;

/// Login identity plus plaintext password, alive for a single call
#[derive(Clone)]
pub struct Credential {
    pub login_identity: String,
    pub password: String,
}

impl Credential {
    pub fn new(login_identity: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login_identity: login_identity.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("login_identity", &self.login_identity)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Row to insert at registration
#[derive(Clone)]
pub struct NewSubject {
    pub login_identity: String,
    pub username: Option<String>,
    pub password_hash: String,
}

impl fmt::Debug for NewSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewSubject")
            .field("login_identity", &self.login_identity)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Persisted subject
#[derive(Clone, Serialize, sqlx::FromRow)]
pub struct SubjectRecord {
    pub id: SubjectId,
    pub login_identity: String,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for SubjectRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectRecord")
            .field("id", &self.id)
            .field("login_identity", &self.login_identity)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let credential = Credential::new("alice@example.com", "correct-horse");
        let output = format!("{:?}", credential);
        assert!(output.contains("alice@example.com"));
        assert!(!output.contains("correct-horse"));

        let record = SubjectRecord {
            id: Uuid::new_v4(),
            login_identity: "alice@example.com".to_string(),
            username: None,
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        };
        assert!(!format!("{:?}", record).contains("$argon2id"));
    }

    #[test]
    fn test_serialize_skips_password_hash() {
        let record = SubjectRecord {
            id: Uuid::new_v4(),
            login_identity: "alice@example.com".to_string(),
            username: Some("alice".to_string()),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }
}
