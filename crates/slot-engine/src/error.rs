//! Error types for slot-engine operations.
//!
//! Every variant is a configuration error: the run aborts and no partial
//! schedule is produced. An empty result is not an error (see
//! [`Schedule::is_empty`](crate::schedule::Schedule::is_empty)).

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("No people configured")]
    NoPeople,

    #[error("Person #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("Person '{person}' has no availability entries")]
    NoAvailability { person: String },

    #[error("Invalid timezone for '{person}': {timezone}")]
    InvalidTimezone { person: String, timezone: String },

    #[error("Invalid time '{value}' in entry {entry} of '{person}' (expected MM-DD HH:mm)")]
    InvalidTime {
        person: String,
        entry: usize,
        value: String,
    },

    #[error("Local time '{value}' in entry {entry} of '{person}' does not exist in {timezone}")]
    NonexistentLocalTime {
        person: String,
        entry: usize,
        value: String,
        timezone: String,
    },

    #[error("Entry {entry} of '{person}' does not end after it begins")]
    InvertedInterval { person: String, entry: usize },

    #[error("Invalid weight {weight} in entry {entry} of '{person}' (must be finite and >= 0)")]
    InvalidWeight {
        person: String,
        entry: usize,
        weight: f64,
    },

    #[error("Granularity of {hours} hours is out of range (1..={max})")]
    InvalidGranularity { hours: u32, max: u32 },

    #[error("Reference year {year} is out of range ({min}..={max})")]
    InvalidYear { year: i32, min: i32, max: i32 },

    #[error("Degenerate scan range: {start} is not before {end}")]
    DegenerateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, SlotError>;
