//! Tests for the interval normalizer and `WeekSchedule` construction.

use std::collections::BTreeMap;

use free_time_engine::normalize::{merge_intervals, normalize_day, BusyInterval};
use free_time_engine::schedule::{ClassEntry, WeekSchedule};
use free_time_engine::time::{Day, TimeOfDay};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn busy(start: &str, end: &str) -> BusyInterval {
    BusyInterval::new(t(start), t(end)).unwrap()
}

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter()
        .map(|(s, e)| (s.to_string(), e.to_string()))
        .collect()
}

// ── Normalizer ──────────────────────────────────────────────────────────────

#[test]
fn overlapping_pair_merges_into_one() {
    let merged = normalize_day(&[("09:30", "10:50"), ("10:00", "11:00")]);
    assert_eq!(merged, vec![busy("09:30", "11:00")]);
}

#[test]
fn unsorted_input_is_sorted() {
    let merged = normalize_day(&[("14:00", "15:00"), ("09:00", "10:00")]);
    assert_eq!(merged, vec![busy("09:00", "10:00"), busy("14:00", "15:00")]);
}

#[test]
fn touching_intervals_merge() {
    // 10:00 end meets 10:00 start: one block, no zero-length gap.
    let merged = normalize_day(&[("09:00", "10:00"), ("10:00", "11:00")]);
    assert_eq!(merged, vec![busy("09:00", "11:00")]);
}

#[test]
fn contained_interval_is_absorbed() {
    let merged = normalize_day(&[("09:00", "12:00"), ("10:00", "11:00")]);
    assert_eq!(merged, vec![busy("09:00", "12:00")]);
}

#[test]
fn malformed_entries_are_skipped_not_fatal() {
    let merged = normalize_day(&[
        ("11:00", "10:00"), // reversed
        ("10:00", "10:00"), // zero length
        ("nine", "10:00"),  // unparsable
        ("13:00", "14:00"),
    ]);
    assert_eq!(merged, vec![busy("13:00", "14:00")]);
}

#[test]
fn empty_day_stays_empty() {
    let merged = normalize_day::<&str>(&[]);
    assert!(merged.is_empty());
}

#[test]
fn merging_normalized_output_is_a_no_op() {
    let once = normalize_day(&[("09:30", "10:50"), ("10:00", "11:00"), ("13:00", "14:00")]);
    let twice = merge_intervals(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn busy_interval_rejects_non_positive_span() {
    assert!(BusyInterval::new(t("10:00"), t("10:00")).is_none());
    assert!(BusyInterval::new(t("10:00"), t("09:00")).is_none());
    assert_eq!(busy("09:15", "10:00").duration_minutes(), 45);
}

// ── WeekSchedule ────────────────────────────────────────────────────────────

#[test]
fn schedule_from_raw_normalizes_each_day() {
    let mut raw = BTreeMap::new();
    raw.insert("Mon", pairs(&[("09:30", "10:50"), ("10:00", "11:00")]));
    raw.insert("Wed", pairs(&[("13:00", "14:00")]));

    let schedule = WeekSchedule::from_raw(&raw);

    assert_eq!(schedule.busy(Day::Mon), &[busy("09:30", "11:00")]);
    assert_eq!(schedule.busy(Day::Wed), &[busy("13:00", "14:00")]);
    assert!(schedule.busy(Day::Tue).is_empty());
    assert_eq!(schedule.interval_count(), 2);
}

#[test]
fn schedule_skips_unknown_day_keys() {
    let mut raw = BTreeMap::new();
    raw.insert("Mon", pairs(&[("09:00", "10:00")]));
    raw.insert("Someday", pairs(&[("11:00", "12:00")]));

    let schedule = WeekSchedule::from_raw(&raw);

    assert_eq!(schedule.interval_count(), 1);
}

#[test]
fn short_and_long_day_keys_share_one_day() {
    let mut raw = BTreeMap::new();
    raw.insert("Mon", pairs(&[("09:00", "10:00")]));
    raw.insert("Monday", pairs(&[("09:30", "11:00")]));

    let schedule = WeekSchedule::from_raw(&raw);

    assert_eq!(schedule.busy(Day::Mon), &[busy("09:00", "11:00")]);
}

#[test]
fn schedule_from_class_list_groups_by_day() {
    let classes = vec![
        ClassEntry {
            day: "Tue".into(),
            start: "10:00".into(),
            end: "11:15".into(),
            name: Some("CS 101".into()),
        },
        ClassEntry {
            day: "Tue".into(),
            start: "09:00".into(),
            end: "10:15".into(),
            name: None,
        },
        ClassEntry {
            day: "Thu".into(),
            start: "15:00".into(),
            end: "14:00".into(), // malformed, dropped
            name: None,
        },
    ];

    let schedule = WeekSchedule::from_classes(&classes);

    assert_eq!(schedule.busy(Day::Tue), &[busy("09:00", "11:15")]);
    assert!(schedule.busy(Day::Thu).is_empty());
}

#[test]
fn schedule_deserializes_from_either_shape() {
    let by_day: WeekSchedule =
        serde_json::from_str(r#"{"Fri": [["12:00", "13:00"]], "Sat": []}"#).unwrap();
    let classes: WeekSchedule = serde_json::from_str(
        r#"{"classes": [{"day": "Fri", "start": "12:00", "end": "13:00", "name": "Lab"}]}"#,
    )
    .unwrap();

    assert_eq!(by_day, classes);
    assert_eq!(by_day.busy(Day::Fri), &[busy("12:00", "13:00")]);
}

#[test]
fn missing_schedule_deserializes_as_none() {
    let schedule: Option<WeekSchedule> = serde_json::from_str("null").unwrap();
    assert!(schedule.is_none());
}

#[test]
fn schedule_serializes_all_seven_days() {
    let schedule: WeekSchedule =
        serde_json::from_str(r#"{"Mon": [["10:00", "11:00"], ["10:30", "12:00"]]}"#).unwrap();

    let value = serde_json::to_value(&schedule).unwrap();
    let obj = value.as_object().unwrap();

    assert_eq!(obj.len(), 7);
    assert_eq!(value["Mon"], serde_json::json!([["10:00", "12:00"]]));
    assert_eq!(value["Sun"], serde_json::json!([]));

    let raw = schedule.to_raw();
    assert_eq!(raw.len(), 7);
    assert_eq!(raw[&Day::Mon], vec![("10:00".to_string(), "12:00".to_string())]);
}

#[test]
fn extend_day_renormalizes() {
    let mut schedule = WeekSchedule::new();
    schedule.extend_day(Day::Sat, vec![busy("10:00", "11:00")]);
    schedule.extend_day(Day::Sat, vec![busy("08:00", "10:30")]);

    assert_eq!(schedule.busy(Day::Sat), &[busy("08:00", "11:00")]);
}

#[test]
fn empty_day_equals_absent_day() {
    let with_empty: WeekSchedule = serde_json::from_str(r#"{"Sat": [], "Sun": []}"#).unwrap();
    let mut emptied = WeekSchedule::new();
    emptied.extend_day(Day::Sun, Vec::new());

    assert_eq!(with_empty, WeekSchedule::new());
    assert_eq!(emptied, WeekSchedule::new());
    assert_eq!(with_empty.interval_count(), 0);
}

#[test]
fn structurally_malformed_pairs_are_skipped() {
    let schedule: WeekSchedule = serde_json::from_str(
        r#"{
            "Mon": [["09:00"], ["10:00", "11:00", "12:00"], [900, 1000], "09:00-10:00",
                    ["13:00", "14:00"]],
            "Tue": "all day",
            "Wed": [["08:30", "09:45"]]
        }"#,
    )
    .unwrap();

    assert_eq!(schedule.busy(Day::Mon), &[busy("13:00", "14:00")]);
    assert!(schedule.busy(Day::Tue).is_empty());
    assert_eq!(schedule.busy(Day::Wed), &[busy("08:30", "09:45")]);
}
