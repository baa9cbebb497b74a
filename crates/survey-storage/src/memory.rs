use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use survey_core::EmailAddress;
use survey_core::models::participant::Participant;

use crate::error::StorageError;
use crate::store::{ParticipantStore, Version, Versioned};

#[derive(Default)]
struct Documents {
    /// Serialized document and the revision it was written at.
    by_email: HashMap<String, (u64, Vec<u8>)>,
    /// Store-wide so a deleted and re-created document never reuses a
    /// revision.
    last_revision: u64,
}

/// In-process participant store with the same compare-and-swap semantics
/// as the S3 store. Documents go through serde on every write and read.
#[derive(Default)]
pub struct MemoryParticipantStore {
    documents: Mutex<Documents>,
}

impl MemoryParticipantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.lock().await.by_email.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ParticipantStore for MemoryParticipantStore {
    async fn load(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Versioned<Participant>>, StorageError> {
        let documents = self.documents.lock().await;
        match documents.by_email.get(email.as_str()) {
            Some((revision, body)) => Ok(Some(Versioned {
                value: serde_json::from_slice(body)?,
                version: Version::new(revision.to_string()),
            })),
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        participant: &Participant,
        expected: Option<&Version>,
    ) -> Result<Version, StorageError> {
        let body = serde_json::to_vec(participant)?;
        let key = participant.email.as_str();

        let mut documents = self.documents.lock().await;
        let current = documents
            .by_email
            .get(key)
            .map(|(revision, _)| revision.to_string());
        let matches = match (expected, current.as_deref()) {
            (None, None) => true,
            (Some(expected), Some(current)) => expected.as_str() == current,
            _ => false,
        };
        if !matches {
            return Err(StorageError::Conflict {
                key: key.to_string(),
            });
        }

        documents.last_revision += 1;
        let revision = documents.last_revision;
        documents.by_email.insert(key.to_string(), (revision, body));
        Ok(Version::new(revision.to_string()))
    }

    async fn delete(&self, email: &EmailAddress) -> Result<(), StorageError> {
        self.documents.lock().await.by_email.remove(email.as_str());
        Ok(())
    }
}
