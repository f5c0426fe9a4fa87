//! Normalization -- converts local wall-clock availability into absolute intervals.
//!
//! Each raw entry is written as `"MM-DD HH:mm"` in the person's own IANA time
//! zone. A shared reference year is prefixed before parsing, so every person's
//! entries land on the same calendar. Zone conversion happens once here, never
//! inside the scan.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use chrono_tz::Tz;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::dst::{self, DstPolicy};
use crate::error::{Result, SlotError};

/// Format of a local time after the reference year has been prefixed.
pub const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Accepted reference years; `%Y` parsing and every offset stay in range.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// One availability declaration as written in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAvailability {
    /// Local begin, `"MM-DD HH:mm"`.
    pub begin: String,
    /// Local end, `"MM-DD HH:mm"`.
    pub end: String,
    pub weight: f64,
}

/// A person as written in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPerson {
    pub name: String,
    /// IANA time zone identifier (e.g. "Asia/Shanghai").
    pub timezone: String,
    #[serde(default)]
    pub available: Vec<RawAvailability>,
}

/// An absolute availability interval with its weight. `begin < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub weight: f64,
}

impl Interval {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.begin).num_minutes()
    }
}

/// A validated person: non-empty name, resolved zone, at least one interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub timezone: Tz,
    pub availability: Vec<Interval>,
}

/// Options shared by every person during normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Placeholder year for `"MM-DD HH:mm"` strings.
    pub year: i32,
    pub dst_policy: DstPolicy,
}

impl NormalizeOptions {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            dst_policy: DstPolicy::default(),
        }
    }

    /// # Errors
    /// Returns `SlotError::InvalidYear` if the year is outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn validate(&self) -> Result<()> {
        if (MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            Ok(())
        } else {
            Err(SlotError::InvalidYear {
                year: self.year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            })
        }
    }
}

impl Default for NormalizeOptions {
    /// Uses the current UTC calendar year as the reference year.
    fn default() -> Self {
        Self::new(Utc::now().year())
    }
}

/// Normalize every person. Fails on the first invalid person or entry; no
/// partial result is returned.
///
/// # Errors
/// Returns `SlotError::InvalidYear` if the reference year is outside
/// [`MIN_YEAR`]..=[`MAX_YEAR`], `SlotError::NoPeople` for an empty list, and any
/// error from [`normalize_person`].
pub fn normalize_people(raw: &[RawPerson], options: NormalizeOptions) -> Result<Vec<Person>> {
    options.validate()?;
    if raw.is_empty() {
        return Err(SlotError::NoPeople);
    }

    let people = raw
        .iter()
        .enumerate()
        .map(|(index, person)| normalize_person(index + 1, person, options))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "normalized {} people ({} intervals) with reference year {}",
        people.len(),
        people.iter().map(|p| p.availability.len()).sum::<usize>(),
        options.year
    );
    Ok(people)
}

/// Normalize one person. `index` is 1-based and only used for error reporting
/// when the name itself is empty.
///
/// # Errors
/// - `SlotError::EmptyName` if the name is blank.
/// - `SlotError::InvalidTimezone` if the zone is not a known IANA identifier.
/// - `SlotError::NoAvailability` if the person declares no entries.
/// - Any error from [`normalize_entry`].
pub fn normalize_person(index: usize, raw: &RawPerson, options: NormalizeOptions) -> Result<Person> {
    let name = raw.name.trim();
    if name.is_empty() {
        return Err(SlotError::EmptyName { index });
    }

    let timezone: Tz = raw
        .timezone
        .trim()
        .parse()
        .map_err(|_| SlotError::InvalidTimezone {
            person: name.to_string(),
            timezone: raw.timezone.clone(),
        })?;

    if raw.available.is_empty() {
        return Err(SlotError::NoAvailability {
            person: name.to_string(),
        });
    }

    let availability = raw
        .available
        .iter()
        .enumerate()
        .map(|(i, entry)| normalize_entry(name, i + 1, entry, timezone, options))
        .collect::<Result<Vec<_>>>()?;

    Ok(Person {
        name: name.to_string(),
        timezone,
        availability,
    })
}

/// Normalize a single `(begin, end, weight)` entry of `person`.
///
/// # Errors
/// - `SlotError::InvalidTime` if either string does not parse as `MM-DD HH:mm`.
/// - `SlotError::NonexistentLocalTime` if a time falls in a DST gap under
///   `DstPolicy::Reject`.
/// - `SlotError::InvertedInterval` if the end is not after the begin.
/// - `SlotError::InvalidWeight` if the weight is negative, NaN or infinite.
pub fn normalize_entry(
    person: &str,
    entry: usize,
    raw: &RawAvailability,
    timezone: Tz,
    options: NormalizeOptions,
) -> Result<Interval> {
    if !raw.weight.is_finite() || raw.weight < 0.0 {
        return Err(SlotError::InvalidWeight {
            person: person.to_string(),
            entry,
            weight: raw.weight,
        });
    }

    let begin = to_utc(person, entry, &raw.begin, timezone, options)?;
    let end = to_utc(person, entry, &raw.end, timezone, options)?;

    if begin >= end {
        return Err(SlotError::InvertedInterval {
            person: person.to_string(),
            entry,
        });
    }

    trace!(
        "{} entry {}: {} .. {} ({}) -> {} .. {} UTC",
        person,
        entry,
        raw.begin,
        raw.end,
        timezone,
        begin,
        end
    );

    Ok(Interval {
        begin,
        end,
        weight: raw.weight,
    })
}

/// Parse `"MM-DD HH:mm"` under the reference year and resolve it in `timezone`.
fn to_utc(
    person: &str,
    entry: usize,
    value: &str,
    timezone: Tz,
    options: NormalizeOptions,
) -> Result<DateTime<Utc>> {
    let full = format!("{:04}-{}", options.year, value.trim());
    let naive =
        NaiveDateTime::parse_from_str(&full, LOCAL_FORMAT).map_err(|_| SlotError::InvalidTime {
            person: person.to_string(),
            entry,
            value: value.to_string(),
        })?;

    dst::resolve_local(naive, timezone, options.dst_policy)
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| SlotError::NonexistentLocalTime {
            person: person.to_string(),
            entry,
            value: value.to_string(),
            timezone: timezone.to_string(),
        })
}
