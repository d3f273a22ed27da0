use rhcli::endpoints::{month_query, summary_query};
use rhcli::navigation::items_for;
use rhcli::shifts::{ShiftDraft, ShiftError, format_time, generate_name};
use rhcli::types::{Role, Shift, ShiftKind, SummaryFilter, User};
use rhcli::utils::*;
use serde_json::json;

// Helper function to create a test user
fn create_test_user(role: Role) -> User {
    User {
        id: 1,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        name: None,
        email: None,
        role,
        department: None,
        avatar: None,
    }
}

// Helper function to create a stored shift
fn create_test_shift(id: u64, start: &str, end: &str, kind: ShiftKind) -> Shift {
    Shift {
        id,
        name: generate_name(start, end),
        label: format!("Horaire {} - {}", format_time(start), format_time(end)),
        kind,
        start_time: start.to_string(),
        end_time: end.to_string(),
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_parse_field() {
    let field = parse_field("reason=Rendez-vous médical").unwrap();
    assert_eq!(field.key, "reason");
    assert_eq!(field.value, "Rendez-vous médical");

    // only the first '=' splits
    let field = parse_field("note=a=b").unwrap();
    assert_eq!(field.value, "a=b");

    // empty values are allowed
    assert_eq!(parse_field("comment=").unwrap().value, "");
}

#[test]
fn test_parse_field_invalid() {
    assert!(parse_field("no-separator").is_err());
    assert!(parse_field("=value").is_err());
    assert!(parse_field("  =value").is_err());
}

#[test]
fn test_fields_to_value() {
    let fields = vec![
        parse_field("start_date=2024-03-01").unwrap(),
        parse_field("end_date=2024-03-05").unwrap(),
    ];
    assert_eq!(
        fields_to_value(&fields),
        json!({"start_date": "2024-03-01", "end_date": "2024-03-05"})
    );
    assert_eq!(fields_to_value(&[]), json!({}));
}

#[test]
fn test_fields_to_value_three_repeats() {
    let fields = vec![
        parse_field("days=monday").unwrap(),
        parse_field("days=wednesday").unwrap(),
        parse_field("days=friday").unwrap(),
    ];
    assert_eq!(
        fields_to_value(&fields),
        json!({"days": ["monday", "wednesday", "friday"]})
    );
}

#[test]
fn test_summary_query_all_filters() {
    let filter = SummaryFilter {
        period: Some("weekly".to_string()),
        date: Some("2024-03-04".to_string()),
        page: Some(3),
        per_page: Some(10),
    };
    assert_eq!(
        summary_query(&filter),
        "?period=weekly&date=2024-03-04&page=3&per_page=10&"
    );
}

#[test]
fn test_summary_query_empty_values() {
    assert_eq!(summary_query(&SummaryFilter::default()), "?");

    let filter = SummaryFilter {
        period: Some(String::new()),
        date: None,
        page: Some(0),
        per_page: Some(15),
    };
    assert_eq!(summary_query(&filter), "?per_page=15&");
}

#[test]
fn test_month_query() {
    assert_eq!(month_query(Some("2024-02")), "?month=2024-02");
    assert_eq!(month_query(Some("")), "");
    assert_eq!(month_query(None), "");
}

#[test]
fn test_generate_name() {
    assert_eq!(generate_name("06:00", "14:00"), "06H00 - 14H00");
    assert_eq!(generate_name("22:00:00", "06:00:00"), "22H00 - 06H00");
}

#[test]
fn test_shift_draft_roundtrip_from_stored_shift() {
    let shift = create_test_shift(4, "14:00:00", "22:00:00", ShiftKind::Evening);
    let draft = ShiftDraft::from_shift(&shift);

    assert_eq!(draft.start_time, "14:00");
    assert_eq!(draft.end_time, "22:00");
    assert_eq!(draft.kind, ShiftKind::Evening);

    let payload = draft.payload().unwrap();
    assert_eq!(payload.name, "14H00 - 22H00");
    assert_eq!(payload.label, "Horaire 14:00 - 22:00");
}

#[test]
fn test_shift_draft_requires_both_times() {
    let draft = ShiftDraft::new("08:00", "  ", ShiftKind::Morning);
    assert!(matches!(draft.payload(), Err(ShiftError::MissingTimes)));
}

#[test]
fn test_overnight_shift_is_flagged_not_rejected() {
    let draft = ShiftDraft::new("22:00", "06:00", ShiftKind::Evening);
    assert!(draft.ends_before_start());
    assert!(draft.payload().is_ok());

    let same = ShiftDraft::new("08:00", "08:00", ShiftKind::Morning);
    assert!(same.ends_before_start());

    let normal = ShiftDraft::new("08:00", "16:00", ShiftKind::Morning);
    assert!(!normal.ends_before_start());
}

#[test]
fn test_navigation_per_role() {
    assert!(items_for(None).is_empty());

    let employee = items_for(Some(&create_test_user(Role::Employee)));
    assert!(employee.iter().all(|i| i.roles.contains(&Role::Employee)));
    assert!(!employee.iter().any(|i| i.path == "shift"));

    let admin = items_for(Some(&create_test_user(Role::Admin)));
    assert!(admin.iter().any(|i| i.path == "shift"));
}
