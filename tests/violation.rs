mod common;

use asset_records::{
    Record, Value, resolve_violations,
    violation::{self, ViolationRule},
};
use common::{material, record};
use proptest::prelude::*;

#[test]
fn restricted_profile_with_wrong_part_is_corrected() {
    let output = resolve_violations(vec![material("ZPP2", "A")]);
    let expected = record(&[
        ("Serial_No_Profile", Value::from("ZPP2")),
        ("Replacement_Part", Value::from("B")),
        ("Violation", Value::Integer(1)),
        ("cleaned(Unprocessed)", Value::Boolean(true)),
    ]);
    assert_eq!(output, vec![expected]);
}

#[test]
fn compliant_and_unrestricted_records_are_flagged_zero() {
    let output = resolve_violations(vec![material("ZPP8", "B"), material("ZXX9", "Q")]);
    assert_eq!(output[0].get("Violation"), Some(&Value::Integer(0)));
    assert_eq!(output[0].get_str("Replacement_Part"), Some("B"));
    assert_eq!(output[1].get("Violation"), Some(&Value::Integer(0)));
    assert_eq!(output[1].get_str("Replacement_Part"), Some("Q"));
    assert_eq!(output[1].get("cleaned(Unprocessed)"), Some(&Value::Boolean(true)));
}

#[test]
fn absent_or_null_part_on_restricted_profile_is_a_violation() {
    let absent = record(&[("Serial_No_Profile", Value::from("ZCS1"))]);
    let null = record(&[
        ("Serial_No_Profile", Value::from("ZCS1")),
        ("Replacement_Part", Value::Null),
    ]);
    for output in resolve_violations(vec![absent, null]) {
        assert_eq!(output.get("Violation"), Some(&Value::Integer(1)));
        assert_eq!(output.get_str("Replacement_Part"), Some("B"));
    }
}

#[test]
fn missing_profile_is_never_a_violation() {
    let output = resolve_violations(vec![record(&[("Replacement_Part", Value::from("A"))])]);
    assert_eq!(output[0].get("Violation"), Some(&Value::Integer(0)));
    assert_eq!(output[0].get_str("Replacement_Part"), Some("A"));
}

#[test]
fn detect_then_correct_matches_resolve() {
    let batch = vec![material("ZPP2", "A"), material("ZPP2", "B"), material("N/A", "A")];
    let split = violation::correct(violation::detect(batch.clone()));
    assert_eq!(split, resolve_violations(batch));
}

#[test]
fn correction_is_unconditional_once_flagged() {
    let flagged = record(&[
        ("Serial_No_Profile", Value::from("OTHER")),
        ("Replacement_Part", Value::from("A")),
        ("Violation", Value::Integer(1)),
    ]);
    let output = violation::correct(vec![flagged]);
    assert_eq!(output[0].get_str("Replacement_Part"), Some("B"));
}

#[test]
fn custom_rule_uses_its_own_profiles_and_part() {
    let rule = ViolationRule::new(["ZAA1"], "K");
    let output = rule.resolve(vec![material("ZAA1", "B"), material("ZPP2", "A")]);
    assert_eq!(output[0].get_str("Replacement_Part"), Some("K"));
    assert_eq!(output[1].get("Violation"), Some(&Value::Integer(0)));
    assert_eq!(output[1].get_str("Replacement_Part"), Some("A"));
}

fn profile() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ZPP2".to_string()),
        Just("ZPP8".to_string()),
        Just("ZCS1".to_string()),
        "[A-Z0-9]{0,5}",
    ]
}

fn part() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::from("B")),
        "[A-Z]{0,2}".prop_map(Value::from),
        any::<i64>().prop_map(Value::Integer),
    ]
}

fn batch() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (profile(), part()).prop_map(|(profile, part)| {
            record(&[
                ("Serial_No_Profile", Value::from(profile)),
                ("Replacement_Part", part),
            ])
        }),
        0..20,
    )
}

proptest! {
    #[test]
    fn resolving_twice_equals_resolving_once(batch in batch()) {
        let once = resolve_violations(batch);
        let twice = resolve_violations(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn unrestricted_parts_are_never_touched(batch in batch()) {
        let output = resolve_violations(batch.clone());
        prop_assert_eq!(output.len(), batch.len());
        for (before, after) in batch.iter().zip(&output) {
            let restricted = matches!(
                before.get_str("Serial_No_Profile"),
                Some("ZPP2" | "ZPP8" | "ZCS1")
            );
            if restricted {
                prop_assert_eq!(after.get_str("Replacement_Part"), Some("B"));
                let was_violation = before.get_str("Replacement_Part") != Some("B");
                prop_assert_eq!(
                    after.get("Violation"),
                    Some(&Value::Integer(i64::from(was_violation)))
                );
            } else {
                prop_assert_eq!(after.get("Replacement_Part"), before.get("Replacement_Part"));
                prop_assert_eq!(after.get("Violation"), Some(&Value::Integer(0)));
            }
        }
    }
}
