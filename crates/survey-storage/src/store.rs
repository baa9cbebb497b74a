use async_trait::async_trait;

use survey_core::EmailAddress;
use survey_core::models::participant::Participant;

use crate::error::StorageError;

/// Opaque token identifying one stored revision of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(String);

impl Version {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A loaded value together with the revision it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub value: T,
    pub version: Version,
}

/// Persistence for participant documents, keyed by e-mail.
///
/// A participant document carries all of its instrument results, so one
/// `save` commits the participant and every result atomically.
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn load(&self, email: &EmailAddress)
    -> Result<Option<Versioned<Participant>>, StorageError>;

    /// Write `participant`.
    ///
    /// With `expected = None` the document must not exist yet; with
    /// `Some(version)` the stored revision must still be `version`.
    /// Either violation is [`StorageError::Conflict`].
    async fn save(
        &self,
        participant: &Participant,
        expected: Option<&Version>,
    ) -> Result<Version, StorageError>;

    /// Remove the participant together with its results. Missing
    /// documents are not an error.
    async fn delete(&self, email: &EmailAddress) -> Result<(), StorageError>;
}
