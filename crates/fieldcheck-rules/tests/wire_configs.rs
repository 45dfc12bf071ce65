//! Checks declared in the wire format, evaluated against realistic
//! snapshots.

use fieldcheck_core::{
    resolve_path, CustomFunctions, RuleEvaluator, ValidationConfig, ValidationContext,
    ValidationResult,
};
use fieldcheck_rules::StandardEvaluator;
use serde_json::{json, Value};

fn evaluate(config: Value, snapshot: &Value, path: &str) -> ValidationResult {
    let config: ValidationConfig = serde_json::from_value(config).unwrap();
    let functions = CustomFunctions::new();
    let ctx = ValidationContext {
        value: resolve_path(snapshot, path),
        state_model: snapshot,
        custom_functions: &functions,
    };
    StandardEvaluator.evaluate(&config, &ctx).unwrap()
}

#[test]
fn password_confirmation_against_live_state() {
    let config = json!({
        "validateOn": "change",
        "checks": [
            {"type": "required", "message": "Confirm your password"},
            {"type": "matches", "message": "Passwords must match", "args": {"other": {"$state": "/password"}}}
        ]
    });

    let mismatch = json!({"password": "hunter22", "confirm": "hunter2"});
    let result = evaluate(config.clone(), &mismatch, "/confirm");
    assert_eq!(result.errors, vec!["Passwords must match"]);

    let matched = json!({"password": "hunter22", "confirm": "hunter22"});
    assert!(evaluate(config, &matched, "/confirm").valid);
}

#[test]
fn every_failing_check_is_reported() {
    let config = json!({"checks": [
        {"type": "required", "message": "Required"},
        {"type": "minLength", "message": "At least 3", "args": {"min": 3}},
        {"type": "pattern", "message": "Letters only", "args": {"pattern": "^[a-z]+$"}}
    ]});
    let result = evaluate(config, &json!({"code": "9"}), "/code");
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["At least 3", "Letters only"]);
    let kinds: Vec<(&str, bool)> = result
        .checks
        .iter()
        .map(|c| (c.kind.as_str(), c.valid))
        .collect();
    assert_eq!(
        kinds,
        vec![("required", true), ("minLength", false), ("pattern", false)]
    );
}

#[test]
fn age_bounds_from_other_fields() {
    let config = json!({"checks": [
        {"type": "min", "message": "Too young", "args": {"min": {"$state": "/policy/minAge"}}},
        {"type": "max", "message": "Too old", "args": {"max": 120}}
    ]});
    let snapshot = json!({"policy": {"minAge": 18}, "people": [{"age": 17}, {"age": 40}]});
    assert_eq!(
        evaluate(config.clone(), &snapshot, "/people/0/age").errors,
        vec!["Too young"]
    );
    assert!(evaluate(config, &snapshot, "/people/1/age").valid);
}

#[test]
fn conditional_requirement() {
    let config = json!({"checks": [
        {"type": "requiredIf", "message": "Company is required", "args": {"field": {"$state": "/isBusiness"}}}
    ]});
    assert!(!evaluate(config.clone(), &json!({"isBusiness": true}), "/company").valid);
    assert!(evaluate(config, &json!({"isBusiness": false}), "/company").valid);
}
