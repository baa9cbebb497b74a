use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument};

use survey_core::models::feedback::AggregatedFeedback;
use survey_core::models::participant::Participant;

use crate::config::MailConfig;
use crate::error::NotifyError;
use crate::notifier::Notifier;
use crate::render::render_feedback_email;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Delivers feedback through the Mailgun messages API.
pub struct MailgunNotifier {
    config: MailConfig,
    client: reqwest::Client,
}

impl MailgunNotifier {
    pub fn new(config: MailConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl Notifier for MailgunNotifier {
    #[instrument(skip_all, fields(participant = %participant.id))]
    async fn send_feedback(
        &self,
        participant: &Participant,
        feedback: &AggregatedFeedback,
    ) -> Result<(), NotifyError> {
        let body = render_feedback_email(participant, feedback)?;

        let resp = self
            .client
            .post(self.config.messages_url())
            .basic_auth("api", Some(&self.config.api_key))
            .form(&[
                ("from", self.config.from_address.as_str()),
                ("to", participant.email.as_str()),
                ("subject", self.config.subject.as_str()),
                ("text", body.text.as_str()),
                ("html", body.html.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(instruments = feedback.instruments.len(), "feedback e-mail sent");
        Ok(())
    }
}
