//! # slot-engine
//!
//! Find common meeting slots for people spread across time zones.
//!
//! Each person declares availability intervals in local wall-clock time, each
//! with a weight. The engine converts them to absolute UTC instants, steps
//! through the combined range at a fixed granularity, keeps the steps where
//! everyone is available, and ranks them by total weight.
//!
//! ## Modules
//!
//! - [`normalize`] — local `"MM-DD HH:mm"` entries → absolute intervals
//! - [`dst`] — DST gap/overlap policies for local times
//! - [`range`] — global scan bounds
//! - [`scanner`] — fixed-step overlap scan and weight aggregation
//! - [`ranker`] — stable descending-weight ordering
//! - [`schedule`] — the full pipeline and its result
//! - [`report`] — markdown and JSON rendering
//! - [`error`] — Error types

pub mod dst;
pub mod error;
pub mod normalize;
pub mod range;
pub mod ranker;
pub mod report;
pub mod scanner;
pub mod schedule;

pub use dst::DstPolicy;
pub use error::SlotError;
pub use normalize::{normalize_people, Interval, NormalizeOptions, Person, RawAvailability, RawPerson};
pub use range::{scan_range, ScanRange};
pub use ranker::rank;
pub use scanner::{scan, CandidateWindow, CoverageRule, Granularity};
pub use schedule::{find_common_slots, Schedule, ScheduleOptions};
