use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::definitions::definition;
use crate::error::InstrumentError;
use crate::scoring::{Band, InstrumentDefinition, InstrumentId};

/// A scored set of answers for one instrument.
///
/// The total and the label are derived from the answers whenever a result
/// is built, including when it is read back from storage; there is no way
/// to set them independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentResult {
    instrument: InstrumentId,
    answers: Vec<u8>,
    total_score: u32,
    band: Band,
    feedback: &'static str,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl InstrumentResult {
    /// Score `answers` and record them as of `at`.
    pub fn record(
        instrument: InstrumentId,
        answers: &[i64],
        at: Timestamp,
    ) -> Result<Self, InstrumentError> {
        let score = definition(instrument).score(answers)?;
        Ok(Self {
            instrument,
            // In range for u8 once scored.
            answers: answers.iter().map(|&a| a as u8).collect(),
            total_score: score.total,
            band: score.band,
            feedback: score.label,
            created_at: at,
            updated_at: at,
        })
    }

    /// Keep the creation time of the result this one replaces.
    pub fn replacing(mut self, previous: &InstrumentResult) -> Self {
        self.created_at = previous.created_at;
        self
    }

    pub fn instrument(&self) -> InstrumentId {
        self.instrument
    }

    pub fn definition(&self) -> &'static InstrumentDefinition {
        definition(self.instrument)
    }

    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn feedback(&self) -> &'static str {
        self.feedback
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

/// Persisted shape. Score fields present in storage are ignored and
/// recomputed.
#[derive(Deserialize)]
struct StoredResult {
    instrument: InstrumentId,
    answers: Vec<i64>,
    created_at: Timestamp,
    updated_at: Option<Timestamp>,
}

// Equivalent to `#[serde(try_from = "StoredResult")]`, written out so the
// `&'static str` field doesn't force a `'de: 'static` bound.
impl<'de> Deserialize<'de> for InstrumentResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredResult::deserialize(deserializer)?;
        InstrumentResult::try_from(stored).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<StoredResult> for InstrumentResult {
    type Error = InstrumentError;

    fn try_from(stored: StoredResult) -> Result<Self, Self::Error> {
        let mut result =
            InstrumentResult::record(stored.instrument, &stored.answers, stored.created_at)?;
        result.updated_at = stored.updated_at.unwrap_or(stored.created_at);
        Ok(result)
    }
}
