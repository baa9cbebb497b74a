use async_trait::async_trait;

use survey_core::models::feedback::AggregatedFeedback;
use survey_core::models::participant::Participant;

use crate::error::NotifyError;

/// Sends a participant their aggregated feedback.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_feedback(
        &self,
        participant: &Participant,
        feedback: &AggregatedFeedback,
    ) -> Result<(), NotifyError>;
}

/// Used when no mail provider is configured. Every send fails, so
/// `feedback_sent` stays false and the message can be sent later.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send_feedback(
        &self,
        participant: &Participant,
        _feedback: &AggregatedFeedback,
    ) -> Result<(), NotifyError> {
        tracing::warn!(participant = %participant.id, "e-mail disabled, feedback not sent");
        Err(NotifyError::Disabled)
    }
}
