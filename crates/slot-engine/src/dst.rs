//! DST transition policies for local wall-clock times.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Policy for local times that fall into a DST gap (e.g. 02:30 on the night
/// clocks spring forward).
///
/// Ambiguous times (the repeated hour when clocks fall back) always resolve to
/// the earlier of the two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Move the wall-clock time forward by one hour, past the gap.
    #[default]
    ShiftForward,
    /// Treat the nonexistent time as a configuration error.
    Reject,
}

/// Resolve a naive local datetime in `tz` to an absolute instant.
///
/// Returns `None` when the time does not exist and the policy is `Reject`
/// (or when shifting still lands in a gap).
pub fn resolve_local(naive: NaiveDateTime, tz: Tz, policy: DstPolicy) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => match policy {
            DstPolicy::Reject => None,
            DstPolicy::ShiftForward => tz
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest(),
        },
    }
}
