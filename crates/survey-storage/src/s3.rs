use async_trait::async_trait;
use aws_sdk_s3::Client;
use tracing::debug;

use survey_core::EmailAddress;
use survey_core::keys;
use survey_core::models::participant::Participant;

use crate::error::StorageError;
use crate::objects::{self, PutCondition};
use crate::store::{ParticipantStore, Version, Versioned};

/// Participant documents in an S3 bucket, versioned by ETag.
#[derive(Clone)]
pub struct S3ParticipantStore {
    client: Client,
    bucket: String,
}

impl S3ParticipantStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ParticipantStore for S3ParticipantStore {
    async fn load(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Versioned<Participant>>, StorageError> {
        let key = keys::participant(email);
        let output = match objects::get_object(&self.client, &self.bucket, &key).await {
            Ok(output) => output,
            Err(StorageError::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let participant: Participant = serde_json::from_slice(&output.body)?;
        let version = Version::new(output.etag.unwrap_or_default());
        debug!(participant = %participant.id, etag = version.as_str(), "loaded participant");
        Ok(Some(Versioned {
            value: participant,
            version,
        }))
    }

    async fn save(
        &self,
        participant: &Participant,
        expected: Option<&Version>,
    ) -> Result<Version, StorageError> {
        let key = keys::participant(&participant.email);
        let body = serde_json::to_vec_pretty(participant)?;
        let condition = match expected {
            Some(version) => PutCondition::Matches(version.as_str()),
            None => PutCondition::Absent,
        };

        let etag = objects::put_object_conditional(
            &self.client,
            &self.bucket,
            &key,
            body,
            Some("application/json"),
            condition,
        )
        .await?;

        debug!(participant = %participant.id, etag = %etag, "saved participant");
        Ok(Version::new(etag))
    }

    async fn delete(&self, email: &EmailAddress) -> Result<(), StorageError> {
        objects::delete_object(&self.client, &self.bucket, &keys::participant(email)).await
    }
}
