use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InstrumentError;

/// Identifier of a supported screening instrument.
///
/// Declaration order is the canonical order used for listings, storage and
/// feedback.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InstrumentId {
    /// Bergen TikTok Addiction Scale.
    BergenTiktok,
    /// Bergen Instagram Addiction Scale.
    BergenInstagram,
    /// UCLA Loneliness Scale.
    UclaLoneliness,
    /// Abbreviated Prefrontal Symptoms Inventory.
    PrefrontalSymptoms,
    /// Conversational AI Dependency Scale.
    Caids,
}

impl InstrumentId {
    pub const ALL: [InstrumentId; 5] = [
        InstrumentId::BergenTiktok,
        InstrumentId::BergenInstagram,
        InstrumentId::UclaLoneliness,
        InstrumentId::PrefrontalSymptoms,
        InstrumentId::Caids,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentId::BergenTiktok => "bergen_tiktok",
            InstrumentId::BergenInstagram => "bergen_instagram",
            InstrumentId::UclaLoneliness => "ucla_loneliness",
            InstrumentId::PrefrontalSymptoms => "prefrontal_symptoms",
            InstrumentId::Caids => "caids",
        }
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentId {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstrumentId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| InstrumentError::UnknownInstrument(s.to_string()))
    }
}

/// Language-independent severity tier that accompanies each label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Band {
    Low,
    Moderate,
    High,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Moderate => "moderate",
            Band::High => "high",
        }
    }
}

/// Inclusive bounds for a single item answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerRange {
    pub min: u8,
    pub max: u8,
}

/// A band together with the label shown to the participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub band: Band,
    pub label: &'static str,
}

/// Totals up to and including `upper_bound` fall into `tier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Threshold {
    pub upper_bound: u32,
    #[serde(flatten)]
    pub tier: Tier,
}

/// Static description of one instrument.
#[derive(Debug, Serialize)]
pub struct InstrumentDefinition {
    pub id: InstrumentId,
    pub name: &'static str,
    pub title: &'static str,
    /// Item keys in questionnaire order. The item count is their number.
    pub item_keys: &'static [&'static str],
    pub range: AnswerRange,
    /// Sorted by ascending `upper_bound`.
    pub thresholds: &'static [Threshold],
    /// Tier for totals above every threshold.
    pub catch_all: Tier,
}

/// Output of the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub total: u32,
    pub band: Band,
    pub label: &'static str,
}

impl InstrumentDefinition {
    pub fn item_count(&self) -> usize {
        self.item_keys.len()
    }

    /// Check length and per-item bounds. Values are never clamped.
    pub fn validate(&self, answers: &[i64]) -> Result<(), InstrumentError> {
        if answers.len() != self.item_count() {
            return Err(InstrumentError::ItemCount {
                instrument: self.id,
                expected: self.item_count(),
                actual: answers.len(),
            });
        }

        for (index, (&value, &item)) in answers.iter().zip(self.item_keys).enumerate() {
            if value < i64::from(self.range.min) {
                return Err(InstrumentError::BelowMinimum {
                    instrument: self.id,
                    index,
                    item,
                    value,
                    min: self.range.min,
                });
            }
            if value > i64::from(self.range.max) {
                return Err(InstrumentError::AboveMaximum {
                    instrument: self.id,
                    index,
                    item,
                    value,
                    max: self.range.max,
                });
            }
        }
        Ok(())
    }

    /// Map a total to its tier. A total equal to a bound belongs to that
    /// bound's (lower) tier.
    pub fn classify(&self, total: u32) -> Tier {
        self.thresholds
            .iter()
            .find(|t| total <= t.upper_bound)
            .map(|t| t.tier)
            .unwrap_or(self.catch_all)
    }

    /// Validate `answers`, sum them and classify the total.
    pub fn score(&self, answers: &[i64]) -> Result<Score, InstrumentError> {
        self.validate(answers)?;
        // Every answer is within [0, u8::MAX] after validation.
        let total: u32 = answers.iter().map(|&a| a as u32).sum();
        let tier = self.classify(total);
        Ok(Score {
            total,
            band: tier.band,
            label: tier.label,
        })
    }
}
