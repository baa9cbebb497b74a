use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use survey_instruments::{InstrumentId, InstrumentResult};

use super::feedback::{AggregatedFeedback, InstrumentFeedback};
use super::sociodemographic::Sociodemographic;
use crate::email::EmailAddress;
use crate::error::ValidationError;

/// Where the participant answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Location {
    Ec,
    Cl,
}

impl Location {
    pub fn code(&self) -> &'static str {
        match self {
            Location::Ec => "EC",
            Location::Cl => "CL",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Location::Ec => "Ecuador",
            Location::Cl => "Chile",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Location {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EC" => Ok(Location::Ec),
            "CL" => Ok(Location::Cl),
            other => Err(ValidationError::new(
                "location",
                format!("unsupported location code '{other}'"),
            )),
        }
    }
}

/// A survey respondent and everything they have submitted.
///
/// The participant owns its instrument results: there is at most one per
/// instrument, and they are stored and deleted together with the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub email: EmailAddress,
    pub location: Location,
    pub consent_accepted: bool,
    /// Time of the most recent consent.
    pub consent_date: Timestamp,
    pub feedback_sent: bool,
    #[serde(default)]
    pub sociodemographic: Sociodemographic,
    #[serde(default, with = "result_slots")]
    results: BTreeMap<InstrumentId, InstrumentResult>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Participant {
    /// First submission for `email`. Consent is accepted as of `at`.
    pub fn new(
        email: EmailAddress,
        location: Location,
        sociodemographic: Sociodemographic,
        at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            location,
            consent_accepted: true,
            consent_date: at,
            feedback_sent: false,
            sociodemographic,
            results: BTreeMap::new(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Re-submission: refresh location and consent, merge the provided
    /// sociodemographic fields.
    pub fn resubmit(&mut self, location: Location, patch: Sociodemographic, at: Timestamp) {
        self.location = location;
        self.consent_accepted = true;
        self.consent_date = at;
        self.sociodemographic.merge(patch);
        self.updated_at = at;
    }

    /// Create or replace the result for the result's instrument.
    pub fn record_result(&mut self, result: InstrumentResult) {
        let result = match self.results.get(&result.instrument()) {
            Some(previous) => result.replacing(previous),
            None => result,
        };
        self.updated_at = self.updated_at.max(result.updated_at());
        self.results.insert(result.instrument(), result);
    }

    pub fn result(&self, instrument: InstrumentId) -> Option<&InstrumentResult> {
        self.results.get(&instrument)
    }

    /// Results in canonical instrument order.
    pub fn results(&self) -> impl Iterator<Item = &InstrumentResult> {
        self.results.values()
    }

    pub fn mark_feedback_sent(&mut self, at: Timestamp) {
        self.feedback_sent = true;
        self.updated_at = at;
    }

    /// Feedback for every instrument currently on record.
    pub fn feedback(&self) -> AggregatedFeedback {
        AggregatedFeedback {
            email: self.email.clone(),
            instruments: self
                .results
                .iter()
                .map(|(&id, result)| (id, InstrumentFeedback::from(result)))
                .collect(),
        }
    }
}

/// Results are stored as a list; loading rejects a second result for the
/// same instrument.
mod result_slots {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use survey_instruments::{InstrumentId, InstrumentResult};

    pub fn serialize<S: Serializer>(
        results: &BTreeMap<InstrumentId, InstrumentResult>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(results.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<InstrumentId, InstrumentResult>, D::Error> {
        let list = Vec::<InstrumentResult>::deserialize(deserializer)?;
        let mut slots = BTreeMap::new();
        for result in list {
            let id = result.instrument();
            if slots.insert(id, result).is_some() {
                return Err(D::Error::custom(format!("duplicate result for {id}")));
            }
        }
        Ok(slots)
    }
}
