//! In-process credential store backed by a concurrent map

use super::CredentialStore;
use crate::{
    error::AppError,
    models::{NewSubject, SubjectId, SubjectRecord},
};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

/// Keeps subjects in memory, keyed by login identity. State is lost on restart.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    subjects: DashMap<String, SubjectRecord>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert(&self, subject: &NewSubject) -> Result<SubjectId, AppError> {
        // the entry guard holds the shard lock, so check-and-insert is atomic
        match self.subjects.entry(subject.login_identity.clone()) {
            Entry::Occupied(_) => Err(AppError::DuplicateIdentity),
            Entry::Vacant(slot) => {
                let id = Uuid::new_v4();
                slot.insert(SubjectRecord {
                    id,
                    login_identity: subject.login_identity.clone(),
                    username: subject.username.clone(),
                    password_hash: subject.password_hash.clone(),
                    created_at: Utc::now(),
                });
                Ok(id)
            }
        }
    }

    async fn find_by_login(&self, login_identity: &str) -> Result<Option<SubjectRecord>, AppError> {
        Ok(self
            .subjects
            .get(login_identity)
            .map(|entry| entry.value().clone()))
    }
}
