//! Tests for the fixed-step overlap scanner.

use chrono::{DateTime, Utc};
use slot_engine::normalize::{Interval, Person};
use slot_engine::range::{scan_range, ScanRange};
use slot_engine::scanner::{
    scan, scan_step, step_instants, CoverageRule, Granularity, MAX_GRANULARITY_HOURS,
};
use slot_engine::SlotError;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

/// Interval on 2026-06-01 between whole UTC hours.
fn hours(begin: u32, end: u32, weight: f64) -> Interval {
    Interval {
        begin: at(&format!("2026-06-01T{:02}:00:00Z", begin)),
        end: at(&format!("2026-06-01T{:02}:00:00Z", end)),
        weight,
    }
}

fn person(name: &str, availability: Vec<Interval>) -> Person {
    Person {
        name: name.to_string(),
        timezone: chrono_tz::UTC,
        availability,
    }
}

fn run(people: &[Person], rule: CoverageRule) -> Vec<(u32, f64)> {
    let range = scan_range(people).unwrap();
    scan(range, people, Granularity::default(), rule)
        .into_iter()
        .map(|w| (w.begin.format("%H").to_string().parse().unwrap(), w.total_weight))
        .collect()
}

// ── Granularity ─────────────────────────────────────────────────────────────

#[test]
fn default_granularity_is_one_hour() {
    assert_eq!(Granularity::default().num_hours(), 1);
    assert_eq!(Granularity::hours(1).unwrap(), Granularity::default());
}

#[test]
fn zero_granularity_is_rejected() {
    assert_eq!(
        Granularity::hours(0).unwrap_err(),
        SlotError::InvalidGranularity {
            hours: 0,
            max: MAX_GRANULARITY_HOURS,
        }
    );
}

#[test]
fn oversized_granularity_is_rejected() {
    assert!(Granularity::hours(MAX_GRANULARITY_HOURS).is_ok());
    for hours in [MAX_GRANULARITY_HOURS + 1, u32::MAX] {
        assert!(matches!(
            Granularity::hours(hours).unwrap_err(),
            SlotError::InvalidGranularity { .. }
        ));
    }
}

#[test]
fn largest_granularity_scans_without_overflow() {
    let people = vec![
        person("A", vec![hours(9, 17, 1.0)]),
        person("B", vec![hours(9, 17, 2.0)]),
    ];
    let range = scan_range(&people).unwrap();
    let g = Granularity::hours(MAX_GRANULARITY_HOURS).unwrap();
    let windows = scan(range, &people, g, CoverageRule::HalfOpen);

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].begin, at("2026-06-01T09:00:00Z"));
    assert_eq!(windows[0].end - windows[0].begin, g.duration());
}

#[test]
fn window_end_saturates_at_the_latest_instant() {
    let latest = DateTime::<Utc>::MAX_UTC;
    let people = vec![person(
        "A",
        vec![Interval {
            begin: latest - chrono::Duration::hours(2),
            end: latest,
            weight: 1.0,
        }],
    )];
    let window = scan_step(
        latest - chrono::Duration::minutes(30),
        &people,
        Granularity::default(),
        CoverageRule::HalfOpen,
    )
    .unwrap();
    assert_eq!(window.end, latest);
}

// ── Coverage rules ──────────────────────────────────────────────────────────

#[test]
fn half_open_rule_covers_begin_but_not_end() {
    let i = hours(9, 17, 1.0);
    let rule = CoverageRule::HalfOpen;
    assert!(rule.covers(&i, at("2026-06-01T09:00:00Z")));
    assert!(rule.covers(&i, at("2026-06-01T16:59:00Z")));
    assert!(!rule.covers(&i, at("2026-06-01T17:00:00Z")));
    assert!(!rule.covers(&i, at("2026-06-01T08:59:00Z")));
}

#[test]
fn exclusive_rule_covers_neither_endpoint() {
    let i = hours(9, 17, 1.0);
    let rule = CoverageRule::Exclusive;
    assert!(!rule.covers(&i, at("2026-06-01T09:00:00Z")));
    assert!(rule.covers(&i, at("2026-06-01T09:01:00Z")));
    assert!(!rule.covers(&i, at("2026-06-01T17:00:00Z")));
}

#[test]
fn half_open_is_the_default_rule() {
    assert_eq!(CoverageRule::default(), CoverageRule::HalfOpen);
}

// ── Step instants ───────────────────────────────────────────────────────────

#[test]
fn step_instants_stop_before_range_end() {
    let range = ScanRange {
        start: at("2026-06-01T09:00:00Z"),
        end: at("2026-06-01T12:00:00Z"),
    };
    let steps: Vec<_> = step_instants(range, Granularity::default()).collect();
    assert_eq!(
        steps,
        vec![
            at("2026-06-01T09:00:00Z"),
            at("2026-06-01T10:00:00Z"),
            at("2026-06-01T11:00:00Z"),
        ]
    );
}

#[test]
fn partial_last_step_is_still_visited() {
    let range = ScanRange {
        start: at("2026-06-01T09:00:00Z"),
        end: at("2026-06-01T11:30:00Z"),
    };
    assert_eq!(step_instants(range, Granularity::default()).count(), 3);
}

// ── Scan ────────────────────────────────────────────────────────────────────

#[test]
fn two_people_overlap_yields_five_windows_of_weight_three() {
    // A: 09-17 w1, B: 12-20 w2 → overlap 12:00-17:00.
    let people = vec![
        person("A", vec![hours(9, 17, 1.0)]),
        person("B", vec![hours(12, 20, 2.0)]),
    ];
    let windows = run(&people, CoverageRule::HalfOpen);
    assert_eq!(
        windows,
        vec![(12, 3.0), (13, 3.0), (14, 3.0), (15, 3.0), (16, 3.0)]
    );
}

#[test]
fn window_end_is_begin_plus_granularity() {
    let people = vec![
        person("A", vec![hours(9, 17, 1.0)]),
        person("B", vec![hours(12, 20, 2.0)]),
    ];
    let range = scan_range(&people).unwrap();
    let windows = scan(range, &people, Granularity::default(), CoverageRule::HalfOpen);
    assert_eq!(windows[0].begin, at("2026-06-01T12:00:00Z"));
    assert_eq!(windows[0].end, at("2026-06-01T13:00:00Z"));
}

#[test]
fn exclusive_rule_drops_the_step_on_a_begin_boundary() {
    let people = vec![
        person("A", vec![hours(9, 17, 1.0)]),
        person("B", vec![hours(12, 20, 2.0)]),
    ];
    let windows = run(&people, CoverageRule::Exclusive);
    assert_eq!(windows, vec![(13, 3.0), (14, 3.0), (15, 3.0), (16, 3.0)]);
}

#[test]
fn touching_intervals_never_overlap() {
    // A ends exactly when B begins.
    let people = vec![
        person("A", vec![hours(9, 12, 1.0)]),
        person("B", vec![hours(12, 15, 1.0)]),
    ];
    assert!(run(&people, CoverageRule::HalfOpen).is_empty());
    assert!(run(&people, CoverageRule::Exclusive).is_empty());
}

#[test]
fn one_person_without_overlap_empties_the_result() {
    let people = vec![
        person("A", vec![hours(9, 17, 1.0)]),
        person("B", vec![hours(10, 16, 1.0)]),
        person("C", vec![hours(18, 22, 1.0)]),
    ];
    assert!(run(&people, CoverageRule::HalfOpen).is_empty());
}

#[test]
fn overlapping_intervals_of_one_person_stack() {
    let people = vec![
        person("A", vec![hours(9, 17, 1.0), hours(12, 14, 2.0)]),
        person("B", vec![hours(9, 17, 1.0)]),
    ];
    let windows = run(&people, CoverageRule::HalfOpen);
    assert_eq!(
        windows,
        vec![
            (9, 2.0),
            (10, 2.0),
            (11, 2.0),
            (12, 4.0),
            (13, 4.0),
            (14, 2.0),
            (15, 2.0),
            (16, 2.0),
        ]
    );
}

#[test]
fn any_of_several_intervals_satisfies_a_person() {
    let people = vec![
        person("A", vec![hours(9, 10, 1.0), hours(15, 16, 5.0)]),
        person("B", vec![hours(8, 18, 1.0)]),
    ];
    assert_eq!(
        run(&people, CoverageRule::HalfOpen),
        vec![(9, 2.0), (15, 6.0)]
    );
}

#[test]
fn full_span_intervals_cover_every_step_with_truncated_tail() {
    // Range is 8.5 hours; the last step starts at 17:00 and runs past 17:30.
    let span = |w| Interval {
        begin: at("2026-06-01T09:00:00Z"),
        end: at("2026-06-01T17:30:00Z"),
        weight: w,
    };
    let people = vec![person("A", vec![span(1.0)]), person("B", vec![span(2.5)])];
    let range = scan_range(&people).unwrap();
    let windows = scan(range, &people, Granularity::default(), CoverageRule::HalfOpen);

    assert_eq!(windows.len(), 9);
    assert!(windows.iter().all(|w| w.total_weight == 3.5));
    let last = windows.last().unwrap();
    assert_eq!(last.begin, at("2026-06-01T17:00:00Z"));
    assert_eq!(last.end, at("2026-06-01T18:00:00Z"));
}

#[test]
fn coarser_granularity_skips_intermediate_hours() {
    let people = vec![
        person("A", vec![hours(9, 17, 1.0)]),
        person("B", vec![hours(12, 20, 2.0)]),
    ];
    let range = scan_range(&people).unwrap();
    let windows = scan(
        range,
        &people,
        Granularity::hours(2).unwrap(),
        CoverageRule::HalfOpen,
    );
    // Steps: 09, 11, 13, 15, 17, 19.
    let begins: Vec<_> = windows.iter().map(|w| w.begin).collect();
    assert_eq!(
        begins,
        vec![at("2026-06-01T13:00:00Z"), at("2026-06-01T15:00:00Z")]
    );
    assert_eq!(windows[1].end, at("2026-06-01T17:00:00Z"));
}

#[test]
fn single_step_is_evaluated_in_isolation() {
    let people = vec![
        person("A", vec![hours(9, 17, 1.0)]),
        person("B", vec![hours(12, 20, 2.0)]),
    ];
    let g = Granularity::default();
    let hit = scan_step(at("2026-06-01T14:00:00Z"), &people, g, CoverageRule::HalfOpen).unwrap();
    assert_eq!(hit.total_weight, 3.0);
    assert!(scan_step(at("2026-06-01T10:00:00Z"), &people, g, CoverageRule::HalfOpen).is_none());
}

#[test]
fn scanning_twice_gives_identical_output() {
    let people = vec![
        person("A", vec![hours(6, 18, 1.0), hours(10, 12, 3.0)]),
        person("B", vec![hours(8, 20, 2.0)]),
    ];
    let range = scan_range(&people).unwrap();
    let first = scan(range, &people, Granularity::default(), CoverageRule::HalfOpen);
    let second = scan(range, &people, Granularity::default(), CoverageRule::HalfOpen);
    assert_eq!(first, second);
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_scan_matches_sequential_scan() {
    use slot_engine::scanner::scan_parallel;

    let people = vec![
        person("A", vec![hours(0, 23, 1.0), hours(10, 12, 3.0)]),
        person("B", vec![hours(2, 20, 2.0), hours(5, 6, 1.0)]),
    ];
    let range = scan_range(&people).unwrap();
    let g = Granularity::default();
    assert_eq!(
        scan_parallel(range, &people, g, CoverageRule::HalfOpen),
        scan(range, &people, g, CoverageRule::HalfOpen)
    );
}
