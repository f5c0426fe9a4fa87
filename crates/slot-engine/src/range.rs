//! Scan range -- the span that could contain a universally available instant.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, SlotError};
use crate::normalize::Person;

/// Earliest declared begin to latest declared end, across all people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ScanRange {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Compute the scan range as a min/max reduction over every interval.
///
/// The result does not depend on the order of people or intervals.
///
/// # Errors
/// Returns `SlotError::NoPeople` if there are no intervals at all, and
/// `SlotError::DegenerateRange` if the reduced start is not before the end.
pub fn scan_range(people: &[Person]) -> Result<ScanRange> {
    let range = people
        .iter()
        .flat_map(|p| p.availability.iter())
        .fold(None, |acc: Option<ScanRange>, interval| {
            Some(match acc {
                None => ScanRange {
                    start: interval.begin,
                    end: interval.end,
                },
                Some(r) => ScanRange {
                    start: r.start.min(interval.begin),
                    end: r.end.max(interval.end),
                },
            })
        })
        .ok_or(SlotError::NoPeople)?;

    if range.start >= range.end {
        return Err(SlotError::DegenerateRange {
            start: range.start,
            end: range.end,
        });
    }

    Ok(range)
}
