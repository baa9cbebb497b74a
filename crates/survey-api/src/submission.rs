use std::sync::Arc;

use jiff::Timestamp;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use survey_core::models::feedback::AggregatedFeedback;
use survey_core::models::participant::{Location, Participant};
use survey_core::models::submission::SubmissionRequest;
use survey_core::{EmailAddress, ValidationError};
use survey_instruments::{InstrumentError, InstrumentResult, definition};
use survey_notify::Notifier;
use survey_storage::{ParticipantStore, StorageError, Versioned};

use crate::audit::AuditEvent;

/// How many times a write is re-applied after losing a version race.
const MAX_COMMIT_ATTEMPTS: usize = 5;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("participant not found: {0}")]
    NotFound(EmailAddress),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("too many concurrent updates for {0}")]
    Contention(EmailAddress),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<InstrumentError> for SubmissionError {
    fn from(e: InstrumentError) -> Self {
        let (field, message) = match e {
            InstrumentError::UnknownInstrument(id) => {
                return SubmissionError::Configuration(format!("unknown instrument '{id}'"));
            }
            InstrumentError::ItemCount {
                instrument,
                expected,
                actual,
            } => (
                instrument.to_string(),
                format!("expected {expected} answers, got {actual}"),
            ),
            InstrumentError::BelowMinimum {
                instrument,
                index,
                item,
                value,
                min,
            } => (
                format!("{instrument}[{index}]"),
                format!("answer {value} for {item} is below the minimum of {min}"),
            ),
            InstrumentError::AboveMaximum {
                instrument,
                index,
                item,
                value,
                max,
            } => (
                format!("{instrument}[{index}]"),
                format!("answer {value} for {item} is above the maximum of {max}"),
            ),
            InstrumentError::MissingItem { instrument, item } => {
                (format!("{instrument}.{item}"), "answer is missing".to_string())
            }
            InstrumentError::UnknownItem { instrument, item } => {
                (format!("{instrument}.{item}"), "no such item".to_string())
            }
        };
        SubmissionError::Validation(ValidationError::new(field, message))
    }
}

/// A committed submission.
#[derive(Debug, Clone)]
pub struct Submitted {
    pub participant: Participant,
    pub feedback: AggregatedFeedback,
}

/// Accepts submissions, answers feedback queries and sends feedback e-mail.
pub struct SurveyService {
    store: Arc<dyn ParticipantStore>,
    notifier: Arc<dyn Notifier>,
}

impl SurveyService {
    pub fn new(store: Arc<dyn ParticipantStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Validate and score everything in `request`, then upsert the
    /// participant and every provided instrument in one write.
    ///
    /// Nothing is written unless the whole submission is valid.
    pub async fn submit(&self, request: SubmissionRequest) -> Result<Submitted, SubmissionError> {
        if !request.consent_accepted {
            return Err(ValidationError::new("consent_accepted", "consent required").into());
        }

        let email = EmailAddress::parse(&request.email)?;
        let location: Location = request.location.trim().parse()?;
        let sociodemographic = request.sociodemographic_data.clone().unwrap_or_default();
        sociodemographic.validate()?;

        let now = Timestamp::now();
        let results = request
            .instrument_payloads()
            .into_iter()
            .map(|(id, payload)| -> Result<InstrumentResult, SubmissionError> {
                let answers = payload.resolve(definition(id))?;
                Ok(InstrumentResult::record(id, &answers, now)?)
            })
            .collect::<Result<Vec<_>, SubmissionError>>()?;

        let participant = self
            .update(&email, |current| {
                let mut participant = match current {
                    Some(mut existing) => {
                        existing.resubmit(location, sociodemographic.clone(), now);
                        existing
                    }
                    None => {
                        Participant::new(email.clone(), location, sociodemographic.clone(), now)
                    }
                };
                for result in &results {
                    participant.record_result(result.clone());
                }
                // The feedback now differs from anything sent before.
                participant.feedback_sent = false;
                Ok(participant)
            })
            .await?;

        let instruments: Vec<&str> = results.iter().map(|r| r.instrument().as_str()).collect();
        info!(participant = %participant.id, instruments = ?instruments, "survey submitted");
        AuditEvent::new("survey_submitted", participant.id)
            .with_details(serde_json::json!({ "instruments": instruments }))
            .emit();

        let feedback = participant.feedback();
        Ok(Submitted {
            participant,
            feedback,
        })
    }

    /// Current aggregated feedback for `email`. Read-only.
    pub async fn feedback(&self, email: &str) -> Result<AggregatedFeedback, SubmissionError> {
        let email = EmailAddress::parse(email)?;
        let current = self
            .store
            .load(&email)
            .await?
            .ok_or_else(|| SubmissionError::NotFound(email.clone()))?;
        Ok(current.value.feedback())
    }

    /// Send `feedback` to the participant and record that it was sent.
    ///
    /// Returns whether the participant's stored feedback is now marked as
    /// sent. Failures are logged, never propagated, and never touch survey
    /// data.
    pub async fn dispatch_feedback(
        &self,
        participant: &Participant,
        feedback: &AggregatedFeedback,
    ) -> bool {
        let email = &participant.email;

        if let Err(e) = self.notifier.send_feedback(participant, feedback).await {
            warn!(participant = %participant.id, error = %e, "feedback e-mail not sent");
            return false;
        }

        let now = Timestamp::now();
        let marked = self
            .update(email, |current| {
                let mut current = current.ok_or_else(|| SubmissionError::NotFound(email.clone()))?;
                // A submission that landed after this feedback was built
                // still needs its own e-mail.
                if current.feedback() == *feedback {
                    current.mark_feedback_sent(now);
                }
                Ok(current)
            })
            .await;

        match marked {
            Ok(current) if current.feedback_sent => {
                AuditEvent::new("feedback_sent", participant.id)
                    .with_details(serde_json::json!({ "instruments": feedback.instruments.len() }))
                    .emit();
                true
            }
            Ok(_) => {
                info!(participant = %participant.id, "feedback superseded by a newer submission");
                false
            }
            Err(e) => {
                error!(participant = %participant.id, error = %e, "feedback sent but not recorded");
                false
            }
        }
    }

    /// Send the current feedback again, for a participant whose earlier
    /// send failed or was never recorded.
    pub async fn resend_feedback(&self, email: &str) -> Result<bool, SubmissionError> {
        let email = EmailAddress::parse(email)?;
        let current = self
            .store
            .load(&email)
            .await?
            .ok_or_else(|| SubmissionError::NotFound(email.clone()))?;

        let participant = current.value;
        let feedback = participant.feedback();
        Ok(self.dispatch_feedback(&participant, &feedback).await)
    }

    /// Load, apply, compare-and-swap; on a lost race reload and apply again.
    async fn update<F>(
        &self,
        email: &EmailAddress,
        apply: F,
    ) -> Result<Participant, SubmissionError>
    where
        F: Fn(Option<Participant>) -> Result<Participant, SubmissionError> + Send + Sync,
    {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let (current, expected) = match self.store.load(email).await? {
                Some(Versioned { value, version }) => (Some(value), Some(version)),
                None => (None, None),
            };

            let participant = apply(current)?;

            match self.store.save(&participant, expected.as_ref()).await {
                Ok(_) => return Ok(participant),
                Err(e) if e.is_conflict() => {
                    debug!(attempt, "participant changed concurrently, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(SubmissionError::Contention(email.clone()))
    }
}
