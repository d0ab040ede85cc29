//! Tests for the grade delta engine

use super::{describe, diff, grade_label, Change, Observation};
use crate::ccc::GRADE_FIELDS;
use crate::test_support::card;
use serde_json::json;

#[test]
fn first_observation_is_initial() {
    let current = card(json!({ "note10g": 4, "notesTotal": 10 }));
    let observation = diff(None, &current, &GRADE_FIELDS);

    assert_eq!(observation, Observation::Initial);
    assert!(observation.must_update());
    assert!(observation.report().is_empty());
}

#[test]
fn single_increase_is_reported() {
    let previous = card(json!({ "note10g": 2 }));
    let current = card(json!({ "note10g": 3 }));

    let observation = diff(Some(&previous), &current, &GRADE_FIELDS);
    assert!(observation.must_update());
    assert_eq!(
        observation.report(),
        &[Change {
            field: "note10g".to_string(),
            delta: 1,
            old: 2,
            new: 3,
        }]
    );
    assert_eq!(describe(observation.report()), "+1 (Gr10g)");
}

#[test]
fn identical_records_are_unchanged() {
    let record = card(json!({
        "note10g": 1, "note10b": 0, "note10": 5, "note95": null, "note9": 8, "note8": 2
    }));

    let observation = diff(Some(&record), &record, &GRADE_FIELDS);
    assert_eq!(observation, Observation::Unchanged);
    assert!(!observation.must_update());
}

#[test]
fn decreases_are_ignored() {
    let previous = card(json!({ "note10": 5, "note9": 3 }));
    let current = card(json!({ "note10": 4, "note9": 3 }));

    assert_eq!(diff(Some(&previous), &current, &GRADE_FIELDS), Observation::Unchanged);
}

#[test]
fn missing_and_null_count_as_zero() {
    let previous = card(json!({ "note95": null }));
    let current = card(json!({ "note95": 2, "note8": 1 }));

    let observation = diff(Some(&previous), &current, &GRADE_FIELDS);
    assert_eq!(describe(observation.report()), "+2 (Gr95), +1 (Gr8)");

    // Field disappearing from the fetch reads as 0, i.e. a decrease
    assert_eq!(diff(Some(&current), &previous, &GRADE_FIELDS), Observation::Unchanged);
}

#[test]
fn report_follows_field_order() {
    let previous = card(json!({}));
    let current = card(json!({ "note8": 1, "note10g": 1, "note9": 2 }));

    let labels: Vec<String> = diff(Some(&previous), &current, &GRADE_FIELDS)
        .report()
        .iter()
        .map(Change::label)
        .collect();
    assert_eq!(labels, vec!["Gr10g", "Gr9", "Gr8"]);
}

#[test]
fn only_listed_fields_are_compared() {
    let previous = card(json!({ "notesTotal": 10, "note7": 1 }));
    let current = card(json!({ "notesTotal": 11, "note7": 2 }));

    assert_eq!(diff(Some(&previous), &current, &GRADE_FIELDS), Observation::Unchanged);
    assert_eq!(
        describe(diff(Some(&previous), &current, &["note7"]).report()),
        "+1 (Gr7)"
    );
}

#[test]
fn entry_iff_strictly_greater() {
    for old in 0..4u64 {
        for new in 0..4u64 {
            let previous = card(json!({ "note10": old }));
            let current = card(json!({ "note10": new }));
            let observation = diff(Some(&previous), &current, &GRADE_FIELDS);
            assert_eq!(observation.report().len(), usize::from(new > old), "{old} -> {new}");
        }
    }
}

#[test]
fn label_strips_note_prefix() {
    assert_eq!(grade_label("note10b"), "Gr10b");
    assert_eq!(grade_label("psa10"), "psa10");
}
