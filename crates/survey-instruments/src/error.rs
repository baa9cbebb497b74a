use thiserror::Error;

use crate::scoring::InstrumentId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("{instrument}: expected {expected} answers, got {actual}")]
    ItemCount {
        instrument: InstrumentId,
        expected: usize,
        actual: usize,
    },

    #[error("{instrument}[{index}] ({item}): answer {value} is below the minimum of {min}")]
    BelowMinimum {
        instrument: InstrumentId,
        index: usize,
        item: &'static str,
        value: i64,
        min: u8,
    },

    #[error("{instrument}[{index}] ({item}): answer {value} is above the maximum of {max}")]
    AboveMaximum {
        instrument: InstrumentId,
        index: usize,
        item: &'static str,
        value: i64,
        max: u8,
    },

    #[error("{instrument}: missing answer for item '{item}'")]
    MissingItem {
        instrument: InstrumentId,
        item: &'static str,
    },

    #[error("{instrument}: unknown item '{item}'")]
    UnknownItem {
        instrument: InstrumentId,
        item: String,
    },
}

impl InstrumentError {
    /// Unknown instrument ids point at a deployment bug rather than bad
    /// participant input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, InstrumentError::UnknownInstrument(_))
    }
}
