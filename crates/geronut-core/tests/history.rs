use geronut_core::models::history::{parse_timestamp, ConsultationHistory};
use geronut_core::CoreError;
use jiff::Timestamp;

#[test]
fn push_never_goes_backwards() {
    let later: Timestamp = "2024-03-15T14:30:00Z".parse().unwrap();
    let earlier: Timestamp = "2024-03-15T14:00:00Z".parse().unwrap();

    let mut history = ConsultationHistory::default();
    history.push(later, Some(70.0));
    let entry = history.push(earlier, Some(69.5));
    assert_eq!(entry.at, later);
    assert_eq!(history.len(), 2);
}

#[test]
fn legacy_timestamps_are_read_as_utc() {
    let ts = parse_timestamp("15/03/2024 14:30").unwrap();
    assert_eq!(ts, "2024-03-15T14:30:00Z".parse::<Timestamp>().unwrap());
    let iso = parse_timestamp("2024-03-15T14:30:00").unwrap();
    assert_eq!(iso, ts);
}

#[test]
fn garbage_timestamp_is_an_error() {
    assert!(matches!(
        parse_timestamp("ontem"),
        Err(CoreError::InvalidTimestamp(_))
    ));
}

#[test]
fn out_of_order_history_is_rejected_on_load() {
    let json = r#"[
        {"data": "2024-03-15T14:30:00Z", "peso": 70.0},
        {"data": "2024-03-14T09:00:00Z", "peso": 71.0}
    ]"#;
    assert!(serde_json::from_str::<ConsultationHistory>(json).is_err());
}

#[test]
fn history_round_trips_with_missing_weight() {
    let mut history = ConsultationHistory::default();
    history.push("2024-03-15T14:30:00Z".parse().unwrap(), None);
    history.push("2024-03-16T14:30:00Z".parse().unwrap(), Some(70.2));

    let json = serde_json::to_string(&history).unwrap();
    assert!(json.contains(r#""peso":null"#));
    let back: ConsultationHistory = serde_json::from_str(&json).unwrap();
    assert_eq!(back, history);
}

#[test]
fn zero_weight_from_older_files_loads_as_unset() {
    let json = r#"[
        {"data": "10/01/2023 09:15", "peso": 0},
        {"data": "10/02/2023 09:15", "peso": 68.4},
        {"data": "10/03/2023 09:15"}
    ]"#;
    let history: ConsultationHistory = serde_json::from_str(json).unwrap();
    let weights: Vec<_> = history.entries().iter().map(|e| e.weight_kg).collect();
    assert_eq!(weights, vec![None, Some(68.4), None]);
}
