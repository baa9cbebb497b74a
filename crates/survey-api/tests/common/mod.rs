#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use survey_api::submission::SurveyService;
use survey_core::EmailAddress;
use survey_core::models::feedback::AggregatedFeedback;
use survey_core::models::participant::Participant;
use survey_core::models::submission::SubmissionRequest;
use survey_instruments::InstrumentId;
use survey_notify::{Notifier, NotifyError};
use survey_storage::{MemoryParticipantStore, ParticipantStore, StorageError, Version, Versioned};

/// Counts sends; fails every one when `fail` is set.
#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub sent: AtomicUsize,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_feedback(
        &self,
        _participant: &Participant,
        _feedback: &AggregatedFeedback,
    ) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Rejected {
                status: 500,
                body: "unavailable".to_string(),
            });
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Yields after every load so concurrent callers interleave between their
/// read and their write. Counts the conflicts the inner store reports.
#[derive(Default)]
pub struct InterleavingStore {
    pub inner: MemoryParticipantStore,
    pub conflicts: AtomicUsize,
}

impl InterleavingStore {
    pub fn conflicts(&self) -> usize {
        self.conflicts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParticipantStore for InterleavingStore {
    async fn load(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Versioned<Participant>>, StorageError> {
        let loaded = self.inner.load(email).await;
        tokio::task::yield_now().await;
        loaded
    }

    async fn save(
        &self,
        participant: &Participant,
        expected: Option<&Version>,
    ) -> Result<Version, StorageError> {
        let saved = self.inner.save(participant, expected).await;
        if saved.as_ref().is_err_and(|e| e.is_conflict()) {
            self.conflicts.fetch_add(1, Ordering::SeqCst);
        }
        saved
    }

    async fn delete(&self, email: &EmailAddress) -> Result<(), StorageError> {
        self.inner.delete(email).await
    }
}

/// Loads from the inner store but loses every write race.
pub struct AlwaysConflictStore(pub MemoryParticipantStore);

#[async_trait]
impl ParticipantStore for AlwaysConflictStore {
    async fn load(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Versioned<Participant>>, StorageError> {
        self.0.load(email).await
    }

    async fn save(
        &self,
        participant: &Participant,
        _expected: Option<&Version>,
    ) -> Result<Version, StorageError> {
        Err(StorageError::Conflict {
            key: participant.email.to_string(),
        })
    }

    async fn delete(&self, email: &EmailAddress) -> Result<(), StorageError> {
        self.0.delete(email).await
    }
}

pub fn service(
    store: Arc<MemoryParticipantStore>,
    notifier: Arc<RecordingNotifier>,
) -> SurveyService {
    SurveyService::new(store, notifier)
}

pub fn request(email: &str) -> SubmissionRequest {
    SubmissionRequest {
        email: email.to_string(),
        location: "EC".to_string(),
        consent_accepted: true,
        ..Default::default()
    }
}

pub fn tiktok(answers: Vec<i64>) -> SubmissionRequest {
    request("a@x.com").with_answers(InstrumentId::BergenTiktok, answers)
}

pub async fn stored(store: &MemoryParticipantStore, email: &str) -> Option<Participant> {
    store
        .load(&EmailAddress::parse(email).unwrap())
        .await
        .unwrap()
        .map(|v| v.value)
}
