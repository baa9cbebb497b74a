use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InstrumentError;
use crate::scoring::InstrumentDefinition;

/// Answers for one instrument as they arrive on the wire.
///
/// Either an ordered array (`[3, 3, 3, 3, 3, 3]`) or an object keyed by item
/// (`{"q1_salience": 3, ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AnswerPayload {
    Ordered(Vec<i64>),
    Items(BTreeMap<String, i64>),
}

impl AnswerPayload {
    /// Resolve into answers ordered by the definition's item keys.
    ///
    /// Ordered payloads pass through untouched; length and bounds are the
    /// scorer's job.
    pub fn resolve(&self, definition: &InstrumentDefinition) -> Result<Vec<i64>, InstrumentError> {
        match self {
            AnswerPayload::Ordered(answers) => Ok(answers.clone()),
            AnswerPayload::Items(items) => {
                if let Some(unknown) = items
                    .keys()
                    .find(|key| !definition.item_keys.contains(&key.as_str()))
                {
                    return Err(InstrumentError::UnknownItem {
                        instrument: definition.id,
                        item: unknown.clone(),
                    });
                }

                definition
                    .item_keys
                    .iter()
                    .map(|&item| {
                        items.get(item).copied().ok_or(InstrumentError::MissingItem {
                            instrument: definition.id,
                            item,
                        })
                    })
                    .collect()
            }
        }
    }
}

impl From<Vec<i64>> for AnswerPayload {
    fn from(answers: Vec<i64>) -> Self {
        AnswerPayload::Ordered(answers)
    }
}
