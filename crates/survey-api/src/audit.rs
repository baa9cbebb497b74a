use std::fmt;

use serde::Serialize;
use tracing::info;

/// An application-level audit record.
///
/// Request logging covers the HTTP surface; these events record what the
/// service did with the participant's data. Participants are named by
/// their record id, never by e-mail address.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: &'static str,
    pub participant: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: &'static str, participant: impl fmt::Display) -> Self {
        Self {
            action,
            participant: participant.to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = self.action,
            audit.participant = %self.participant,
            audit.details = %details,
            "audit event"
        );
    }
}
