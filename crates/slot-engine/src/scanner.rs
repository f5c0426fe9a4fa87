//! Overlap scanner -- steps through the scan range and keeps instants where
//! everyone is available.
//!
//! Each step is evaluated independently by [`scan_step`]; the scan is a fold
//! over the step instants with no shared accumulation between steps.

use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::Serialize;

use crate::error::{Result, SlotError};
use crate::normalize::{Interval, Person};
use crate::range::ScanRange;

/// Largest accepted scan step: one leap year.
pub const MAX_GRANULARITY_HOURS: u32 = 24 * 366;

/// Fixed scan step, a whole number of hours (default one hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Granularity(Duration);

impl Granularity {
    /// # Errors
    /// Returns `SlotError::InvalidGranularity` for zero hours or more than
    /// [`MAX_GRANULARITY_HOURS`].
    pub fn hours(hours: u32) -> Result<Self> {
        if hours == 0 || hours > MAX_GRANULARITY_HOURS {
            return Err(SlotError::InvalidGranularity {
                hours,
                max: MAX_GRANULARITY_HOURS,
            });
        }
        Ok(Self(Duration::hours(i64::from(hours))))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub fn num_hours(&self) -> i64 {
        self.0.num_hours()
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Self(Duration::hours(1))
    }
}

/// Which instants an interval covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverageRule {
    /// `begin <= t < end`. Touching intervals never share an instant.
    #[default]
    HalfOpen,
    /// `begin < t < end`. Neither endpoint is covered.
    Exclusive,
}

impl CoverageRule {
    pub fn covers(&self, interval: &Interval, t: DateTime<Utc>) -> bool {
        match self {
            CoverageRule::HalfOpen => interval.begin <= t && t < interval.end,
            CoverageRule::Exclusive => interval.begin < t && t < interval.end,
        }
    }
}

/// One scan step where every person was available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateWindow {
    pub begin: DateTime<Utc>,
    /// `begin + granularity`, even past the end of the scan range. Saturates at
    /// the latest representable instant.
    pub end: DateTime<Utc>,
    /// Sum of the weights of every interval (of every person) covering `begin`.
    pub total_weight: f64,
}

/// Step instants `start, start + g, ...` strictly before `range.end`.
pub fn step_instants(
    range: ScanRange,
    granularity: Granularity,
) -> impl Iterator<Item = DateTime<Utc>> {
    let step = granularity.duration();
    std::iter::successors(Some(range.start), move |t| t.checked_add_signed(step))
        .take_while(move |t| *t < range.end)
}

/// Evaluate a single step.
///
/// Returns `None` if any person has no interval covering `t`. Otherwise the
/// window's weight stacks every covering interval, including several
/// overlapping intervals of the same person.
pub fn scan_step(
    t: DateTime<Utc>,
    people: &[Person],
    granularity: Granularity,
    rule: CoverageRule,
) -> Option<CandidateWindow> {
    let total_weight = people.iter().try_fold(0.0, |acc, person| {
        let mut covering = person
            .availability
            .iter()
            .filter(|interval| rule.covers(interval, t))
            .peekable();
        covering.peek()?;
        Some(acc + covering.map(|interval| interval.weight).sum::<f64>())
    })?;

    Some(CandidateWindow {
        begin: t,
        end: t
            .checked_add_signed(granularity.duration())
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
        total_weight,
    })
}

/// Scan the whole range. Windows come out in chronological order.
pub fn scan(
    range: ScanRange,
    people: &[Person],
    granularity: Granularity,
    rule: CoverageRule,
) -> Vec<CandidateWindow> {
    let windows: Vec<CandidateWindow> = step_instants(range, granularity)
        .filter_map(|t| scan_step(t, people, granularity, rule))
        .collect();

    debug!(
        "scanned {} .. {} in {}h steps: {} candidate windows",
        range.start,
        range.end,
        granularity.num_hours(),
        windows.len()
    );
    windows
}

/// Parallel variant of [`scan`]. Steps are split across rayon workers and
/// collected back in step order, so the output equals [`scan`]'s.
#[cfg(feature = "rayon")]
pub fn scan_parallel(
    range: ScanRange,
    people: &[Person],
    granularity: Granularity,
    rule: CoverageRule,
) -> Vec<CandidateWindow> {
    use rayon::prelude::*;

    let instants: Vec<DateTime<Utc>> = step_instants(range, granularity).collect();
    instants
        .into_par_iter()
        .filter_map(|t| scan_step(t, people, granularity, rule))
        .collect()
}
