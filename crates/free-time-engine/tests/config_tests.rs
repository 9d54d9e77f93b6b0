//! Tests for `EngineConfig` parsing and boundary validation.

use std::collections::BTreeSet;

use free_time_engine::config::EngineConfig;
use free_time_engine::freetime::DayWindow;
use free_time_engine::matcher::MatchMode;
use free_time_engine::time::Day;
use free_time_engine::EngineError;

#[test]
fn empty_json_yields_defaults() {
    let config = EngineConfig::from_json("{}").unwrap();
    assert_eq!(config, EngineConfig::default());

    let validated = config.validate().unwrap();
    assert_eq!(validated.window, DayWindow::default());
    assert_eq!(validated.options.tolerance.minutes(), 0);
    assert_eq!(validated.options.mode, MatchMode::Strict);
    assert!(validated.options.days.is_none());
    assert!(validated.options.timezone.is_none());
}

#[test]
fn full_config_round_trips_into_options() {
    let config = EngineConfig::from_json(
        r#"{
            "day_window": {"start": "07:30", "end": "23:00"},
            "tolerance_minutes": 10,
            "mode": "anchor",
            "days": ["Mon", "wednesday", "Fri"],
            "timezone": "America/New_York"
        }"#,
    )
    .unwrap();

    let validated = config.validate().unwrap();

    assert_eq!(validated.window, DayWindow::parse("07:30", "23:00").unwrap());
    assert_eq!(validated.options.tolerance.minutes(), 10);
    assert_eq!(validated.options.mode, MatchMode::Anchor);
    assert_eq!(
        validated.options.days,
        Some(BTreeSet::from([Day::Mon, Day::Wed, Day::Fri]))
    );
    assert_eq!(
        validated.options.timezone,
        Some(chrono_tz::America::New_York)
    );
}

#[test]
fn inverted_window_fails_validation() {
    let config =
        EngineConfig::from_json(r#"{"day_window": {"start": "22:00", "end": "08:00"}}"#).unwrap();
    assert!(matches!(
        config.validate(),
        Err(EngineError::InvalidWindow { .. })
    ));
}

#[test]
fn negative_tolerance_fails_validation() {
    let config = EngineConfig::from_json(r#"{"tolerance_minutes": -15}"#).unwrap();
    assert!(matches!(
        config.validate(),
        Err(EngineError::NegativeTolerance(-15))
    ));
}

#[test]
fn unknown_day_fails_validation() {
    let config = EngineConfig::from_json(r#"{"days": ["Mon", "Caturday"]}"#).unwrap();
    match config.validate() {
        Err(EngineError::UnknownDay(day)) => assert_eq!(day, "Caturday"),
        other => panic!("expected UnknownDay, got {other:?}"),
    }
}

#[test]
fn unknown_timezone_fails_validation() {
    let config = EngineConfig::from_json(r#"{"timezone": "Mars/Olympus_Mons"}"#).unwrap();
    assert!(matches!(
        config.validate(),
        Err(EngineError::InvalidTimezone(_))
    ));
}

#[test]
fn unknown_mode_is_a_parse_error() {
    let err = EngineConfig::from_json(r#"{"mode": "fuzzy"}"#).unwrap_err();
    assert!(matches!(err, EngineError::Json(_)));
}

#[test]
fn config_serializes_without_empty_optionals() {
    let value = serde_json::to_value(EngineConfig::default()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "day_window": {"start": "08:00", "end": "22:00"},
            "tolerance_minutes": 0,
            "mode": "strict"
        })
    );
}
