//! End-to-end replays of scenario files.

use std::io::Write;

use carousel_replay::{run, ReplayConfig, ReplayError};
use tempfile::NamedTempFile;

fn scenario_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write scenario");
    file
}

#[test]
fn test_hero_reel_replay() {
    let file = scenario_file(
        r#"{
            "slides": [
                {"key": "front", "label": "Front"},
                {"key": "side", "label": "Side"},
                {"key": "interior", "label": "Interior"}
            ],
            "options": {"loop": true, "autoPlay": true, "autoPlayIntervalMs": 1000, "pauseOnHover": true},
            "trackWidth": 800,
            "steps": [
                {"waitMs": 1000},
                {"type": "hover", "data": {"hovered": true}},
                {"waitMs": 5000},
                {"type": "hover", "data": {"hovered": false}},
                {"waitMs": 999},
                {"waitMs": 1},
                {"type": "key", "data": {"key": "ArrowLeft"}}
            ]
        }"#,
    );

    let scenario = ReplayConfig::new(file.path())
        .load_scenario()
        .expect("scenario loads");
    let records = run(&scenario, false).expect("replay runs");

    let actives: Vec<usize> = records.iter().map(|r| r.active_index).collect();
    assert_eq!(actives, vec![1, 1, 1, 1, 1, 2, 1]);

    // Hover suspends autoplay entirely.
    assert!(!records[1].autoplay_running);
    assert_eq!(records[1].pending_timers, 0);
    assert!(records[2].notified.is_empty());

    // Leaving restarts a full interval.
    assert!(records[3].autoplay_running);
    assert!(records[4].fires.is_empty());
    assert_eq!(records[5].notified, vec![2]);
    assert_eq!(records[5].announcement, "Slide 3 of 3");
    assert_eq!(records[6].announcement, "Slide 2 of 3");
}

#[test]
fn test_track_width_override_changes_swipe_threshold() {
    let json = r#"{
        "slides": [{}, {}],
        "trackWidth": 1000,
        "steps": [
            {"type": "pointer", "data": {"phase": "down", "pointerId": 1, "x": 500}},
            {"type": "pointer", "data": {"phase": "move", "pointerId": 1, "x": 400}},
            {"type": "pointer", "data": {"phase": "up", "pointerId": 1, "x": 400}}
        ]
    }"#;
    let file = scenario_file(json);

    let wide = ReplayConfig::new(file.path())
        .load_scenario()
        .expect("scenario loads");
    let records = run(&wide, false).expect("replay runs");
    assert_eq!(records[2].active_index, 0);

    let mut config = ReplayConfig::new(file.path());
    config.track_width = Some(500.0);
    let narrow = config.load_scenario().expect("scenario loads");
    let records = run(&narrow, false).expect("replay runs");
    assert_eq!(records[2].active_index, 1);
}

#[test]
fn test_malformed_scenario_file() {
    let file = scenario_file(r#"{"slides": [{}], "steps": [{"waitMs": -5}]}"#);
    let result = ReplayConfig::new(file.path()).load_scenario();
    assert!(matches!(result, Err(ReplayError::Parse(_))));
}

#[test]
fn test_out_of_range_initial_index_rejected() {
    let file = scenario_file(r#"{"slides": [{}, {}], "options": {"initialIndex": 2}}"#);
    let scenario = ReplayConfig::new(file.path())
        .load_scenario()
        .expect("scenario parses");
    assert!(matches!(run(&scenario, false), Err(ReplayError::Carousel(_))));
}
