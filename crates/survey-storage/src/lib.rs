//! survey-storage
//!
//! Participant persistence. One JSON document per participant, written with
//! compare-and-swap so concurrent submissions for the same e-mail cannot
//! overwrite each other. S3 in production, an in-memory map for tests and
//! local runs.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;

pub use error::StorageError;
pub use memory::MemoryParticipantStore;
pub use s3::S3ParticipantStore;
pub use store::{ParticipantStore, Version, Versioned};
