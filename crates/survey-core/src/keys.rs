//! Storage key conventions.
//!
//! Pure string functions. Each participant is one JSON document that also
//! holds all of its instrument results.

use crate::email::EmailAddress;

pub const PARTICIPANTS_PREFIX: &str = "participants/";

pub fn participant(email: &EmailAddress) -> String {
    format!("{PARTICIPANTS_PREFIX}{email}.json")
}
