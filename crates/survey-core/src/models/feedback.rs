use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use survey_instruments::{Band, InstrumentId, InstrumentResult};

use crate::email::EmailAddress;

/// Score and label for one completed instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstrumentFeedback {
    pub score: u32,
    pub band: Band,
    pub feedback: String,
}

impl From<&InstrumentResult> for InstrumentFeedback {
    fn from(result: &InstrumentResult) -> Self {
        Self {
            score: result.total_score(),
            band: result.band(),
            feedback: result.feedback().to_string(),
        }
    }
}

/// Cumulative feedback: every instrument the participant currently has a
/// result for, not only the ones in the latest submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregatedFeedback {
    #[ts(type = "string")]
    pub email: EmailAddress,
    pub instruments: BTreeMap<InstrumentId, InstrumentFeedback>,
}

impl AggregatedFeedback {
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
