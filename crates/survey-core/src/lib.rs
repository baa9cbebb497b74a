//! survey-core
//!
//! Participant records, the submission request shape and the aggregated
//! feedback view. No storage or transport dependency; this is the shared
//! vocabulary of the survey service.

pub mod email;
pub mod error;
pub mod keys;
pub mod models;

pub use email::EmailAddress;
pub use error::ValidationError;
