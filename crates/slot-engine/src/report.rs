//! Presentation of a [`Schedule`] as a markdown table or a JSON report.
//!
//! Only consumes the schedule; nothing here re-runs the scan.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::schedule::Schedule;

/// Message printed when no instant had everyone available.
pub const NO_COMMON_SLOT: &str = "No common slot found.";

/// Wall-clock format used in every rendered cell.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Width of a time column: `"YYYY-MM-DD HH:mm - YYYY-MM-DD HH:mm"`.
const COLUMN_WIDTH: usize = 35;

// ---------------------------------------------------------------------------
// Markdown
// ---------------------------------------------------------------------------

/// Render the schedule as a markdown table.
///
/// Columns: the UTC window, the same window in each person's zone, then the
/// total weight `W`. An empty schedule renders as [`NO_COMMON_SLOT`].
pub fn render_markdown(schedule: &Schedule) -> String {
    if schedule.is_empty() {
        return format!("{}\n", NO_COMMON_SLOT);
    }

    let mut titles = vec![center("Available time in UTC", COLUMN_WIDTH)];
    titles.extend(
        schedule
            .people
            .iter()
            .map(|p| center(&format!("{} in {}", p.name, p.timezone), COLUMN_WIDTH)),
    );

    let separator = format!(
        "|{}:-:|",
        format!(":{}:|", "-".repeat(COLUMN_WIDTH)).repeat(titles.len())
    );

    let mut out = String::new();
    out.push_str(&format!("| {} | W |\n", titles.join(" | ")));
    out.push_str(&separator);
    out.push('\n');

    for window in &schedule.windows {
        let mut cells = vec![format_span(window.begin, window.end, Tz::UTC)];
        cells.extend(
            schedule
                .people
                .iter()
                .map(|p| format_span(window.begin, window.end, p.timezone)),
        );
        out.push_str(&format!(
            "| {} | {} |\n",
            cells.join(" | "),
            window.total_weight
        ));
    }

    out
}

/// Center `title` in a field of `width` characters. When the padding is odd
/// the extra space goes on the right; titles wider than the field are left as is.
pub fn center(title: &str, width: usize) -> String {
    let pad = width.saturating_sub(title.chars().count());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), title, " ".repeat(pad - left))
}

/// `"YYYY-MM-DD HH:mm - YYYY-MM-DD HH:mm"` in `tz`.
pub fn format_span(begin: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> String {
    format!("{} - {}", format_local(begin, tz), format_local(end, tz))
}

pub fn format_local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format(DISPLAY_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Serializable form of a [`Schedule`].
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub found: bool,
    pub granularity_hours: i64,
    pub range: RangeDto,
    pub people: Vec<PersonDto>,
    pub windows: Vec<WindowDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeDto {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonDto {
    pub name: String,
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowDto {
    /// RFC 3339, UTC.
    pub begin: String,
    /// RFC 3339, UTC.
    pub end: String,
    pub total_weight: f64,
    /// The same window in each person's zone, in people order.
    pub local: Vec<LocalWindowDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalWindowDto {
    pub name: String,
    pub begin: String,
    pub end: String,
}

impl From<&Schedule> for Report {
    fn from(schedule: &Schedule) -> Self {
        let windows = schedule
            .windows
            .iter()
            .map(|w| WindowDto {
                begin: w.begin.to_rfc3339(),
                end: w.end.to_rfc3339(),
                total_weight: w.total_weight,
                local: schedule
                    .people
                    .iter()
                    .map(|p| LocalWindowDto {
                        name: p.name.clone(),
                        begin: format_local(w.begin, p.timezone),
                        end: format_local(w.end, p.timezone),
                    })
                    .collect(),
            })
            .collect();

        Report {
            found: !schedule.is_empty(),
            granularity_hours: schedule.granularity.num_hours(),
            range: RangeDto {
                start: schedule.range.start.to_rfc3339(),
                end: schedule.range.end.to_rfc3339(),
            },
            people: schedule
                .people
                .iter()
                .map(|p| PersonDto {
                    name: p.name.clone(),
                    timezone: p.timezone.to_string(),
                })
                .collect(),
            windows,
        }
    }
}

/// Render the schedule as pretty-printed JSON.
pub fn render_json(schedule: &Schedule) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report::from(schedule))
}
