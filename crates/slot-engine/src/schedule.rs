//! End-to-end pipeline: normalize -> scan range -> scan -> rank.
//!
//! The resulting [`Schedule`] is the contract handed to presentation: ranked
//! UTC windows plus every person's zone, so each window can be re-rendered in
//! local time without scanning again.

use log::info;

use crate::error::Result;
use crate::normalize::{normalize_people, NormalizeOptions, Person, RawPerson};
use crate::range::{scan_range, ScanRange};
use crate::ranker::rank;
use crate::scanner::{scan, CandidateWindow, CoverageRule, Granularity};

/// Knobs for a full run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScheduleOptions {
    pub normalize: NormalizeOptions,
    pub granularity: Granularity,
    pub coverage: CoverageRule,
}

/// Ranked result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Sorted by descending weight; chronological among equal weights.
    pub windows: Vec<CandidateWindow>,
    pub people: Vec<Person>,
    pub range: ScanRange,
    pub granularity: Granularity,
}

impl Schedule {
    /// True when no instant had everyone available. This is a valid outcome,
    /// not an error.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// The highest-weighted window, if any.
    pub fn best(&self) -> Option<&CandidateWindow> {
        self.windows.first()
    }

    /// Keep only the top `limit` windows. A limit of zero empties the schedule.
    pub fn truncate(&mut self, limit: usize) {
        self.windows.truncate(limit);
    }
}

/// Run the whole pipeline over raw configuration records.
///
/// # Errors
/// Any configuration error from normalization or range computation. No
/// partial schedule is produced.
pub fn find_common_slots(raw: &[RawPerson], options: &ScheduleOptions) -> Result<Schedule> {
    let people = normalize_people(raw, options.normalize)?;
    schedule_people(people, options.granularity, options.coverage)
}

/// Run range, scan and rank over already-normalized people.
///
/// # Errors
/// Returns `SlotError::NoPeople` or `SlotError::DegenerateRange` from
/// [`scan_range`].
pub fn schedule_people(
    people: Vec<Person>,
    granularity: Granularity,
    coverage: CoverageRule,
) -> Result<Schedule> {
    let range = scan_range(&people)?;
    let windows = rank(scan(range, &people, granularity, coverage));

    if windows.is_empty() {
        info!("no common slot found for {} people", people.len());
    } else {
        info!(
            "found {} common slots for {} people",
            windows.len(),
            people.len()
        );
    }

    Ok(Schedule {
        windows,
        people,
        range,
        granularity,
    })
}
