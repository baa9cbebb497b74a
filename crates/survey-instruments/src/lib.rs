//! survey-instruments
//!
//! Screening instrument definitions and the scorer. Pure data and pure
//! functions with no storage or transport dependency. Every instrument is an
//! entry in one constant table; scoring is the same sum-then-band rule for
//! all of them.

pub mod answers;
pub mod definitions;
pub mod error;
pub mod results;
pub mod scoring;

pub use answers::AnswerPayload;
pub use definitions::{all_definitions, definition, find_definition};
pub use error::InstrumentError;
pub use results::InstrumentResult;
pub use scoring::{AnswerRange, Band, InstrumentDefinition, InstrumentId, Score, Threshold, Tier};

/// Score `answers` for the instrument named by a string id.
///
/// This is the entry point for callers that only hold the wire id. An id
/// outside the table is a configuration problem, reported as
/// [`InstrumentError::UnknownInstrument`].
pub fn score_by_id(id: &str, answers: &[i64]) -> Result<Score, InstrumentError> {
    find_definition(id)?.score(answers)
}
