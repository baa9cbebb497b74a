use serde::{Deserialize, Serialize};
use ts_rs::TS;

use survey_instruments::{AnswerPayload, InstrumentId};

use super::sociodemographic::Sociodemographic;

/// A survey submission as it arrives from a client.
///
/// Only shape is enforced here; field validation and scoring happen in the
/// aggregator so that every failure names its field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionRequest {
    pub email: String,
    pub location: String,
    #[serde(default)]
    pub consent_accepted: bool,
    #[serde(default)]
    pub sociodemographic_data: Option<Sociodemographic>,
    #[serde(default)]
    pub bergen_tiktok: Option<AnswerPayload>,
    #[serde(default)]
    pub bergen_instagram: Option<AnswerPayload>,
    #[serde(default)]
    pub ucla_loneliness: Option<AnswerPayload>,
    #[serde(default)]
    pub prefrontal_symptoms: Option<AnswerPayload>,
    #[serde(default)]
    pub caids: Option<AnswerPayload>,
}

impl SubmissionRequest {
    /// The instruments present in this submission, in canonical order.
    pub fn instrument_payloads(&self) -> Vec<(InstrumentId, &AnswerPayload)> {
        [
            (InstrumentId::BergenTiktok, &self.bergen_tiktok),
            (InstrumentId::BergenInstagram, &self.bergen_instagram),
            (InstrumentId::UclaLoneliness, &self.ucla_loneliness),
            (InstrumentId::PrefrontalSymptoms, &self.prefrontal_symptoms),
            (InstrumentId::Caids, &self.caids),
        ]
        .into_iter()
        .filter_map(|(id, payload)| payload.as_ref().map(|p| (id, p)))
        .collect()
    }

    /// Attach answers for `instrument`, replacing any already present.
    pub fn with_answers(
        mut self,
        instrument: InstrumentId,
        answers: impl Into<AnswerPayload>,
    ) -> Self {
        let slot = match instrument {
            InstrumentId::BergenTiktok => &mut self.bergen_tiktok,
            InstrumentId::BergenInstagram => &mut self.bergen_instagram,
            InstrumentId::UclaLoneliness => &mut self.ucla_loneliness,
            InstrumentId::PrefrontalSymptoms => &mut self.prefrontal_symptoms,
            InstrumentId::Caids => &mut self.caids,
        };
        *slot = Some(answers.into());
        self
    }
}
