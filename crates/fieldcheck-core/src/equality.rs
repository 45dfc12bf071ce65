//! # Structural Equality for Validation Configurations
//!
//! Decides whether two configurations are interchangeable for registration.
//! The comparison is tuned to the known shape of a check: trigger, then each
//! check's `kind`, `message` and flat argument map, pairwise in order.
//!
//! Not a generic deep comparison. Arguments are scalars or state
//! references, and a state reference is compared by the path it names,
//! never by what that path currently resolves to. Nested argument
//! structures would need a new comparison here.

use crate::config::{DynamicArgs, DynamicValue, ValidationConfig};

/// Two argument values are equal when both are equal literals or both are
/// state references naming the same path. A literal never equals a reference.
pub fn dynamic_value_equal(a: &DynamicValue, b: &DynamicValue) -> bool {
    match (a, b) {
        (DynamicValue::Literal(x), DynamicValue::Literal(y)) => x == y,
        (DynamicValue::StateRef { state: x }, DynamicValue::StateRef { state: y }) => x == y,
        _ => false,
    }
}

/// Two argument maps are equal when they have the same key set and every
/// value pair is equal under [`dynamic_value_equal`].
///
/// An absent `args` field deserializes to the empty map, so absent, empty
/// and omitted all compare equal.
pub fn dynamic_args_equal(a: &DynamicArgs, b: &DynamicArgs) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .all(|(key, va)| b.get(key).is_some_and(|vb| dynamic_value_equal(va, vb)))
}

/// Structural equality for [`ValidationConfig`].
pub fn validation_config_equal(a: &ValidationConfig, b: &ValidationConfig) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if a.validate_on != b.validate_on {
        return false;
    }
    if a.checks.len() != b.checks.len() {
        return false;
    }
    a.checks.iter().zip(&b.checks).all(|(ca, cb)| {
        ca.kind == cb.kind && ca.message == cb.message && dynamic_args_equal(&ca.args, &cb.args)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Primitive, ValidateOn, ValidationCheck};

    fn base() -> ValidationConfig {
        ValidationConfig::new()
            .on(ValidateOn::Blur)
            .check(ValidationCheck::new("required", "Required"))
            .check(ValidationCheck::new("minLength", "Too short").with_arg("min", 3))
    }

    #[test]
    fn fresh_equivalent_configs_are_equal() {
        assert!(validation_config_equal(&base(), &base()));
    }

    #[test]
    fn same_reference_is_equal() {
        let c = base();
        assert!(validation_config_equal(&c, &c));
    }

    #[test]
    fn trigger_difference_is_unequal() {
        let mut other = base();
        other.validate_on = Some(ValidateOn::Change);
        assert!(!validation_config_equal(&base(), &other));

        other.validate_on = None;
        assert!(!validation_config_equal(&base(), &other));
    }

    #[test]
    fn kind_message_and_arg_differences_are_unequal() {
        let mut kind = base();
        kind.checks[0].kind = "email".into();
        assert!(!validation_config_equal(&base(), &kind));

        let mut message = base();
        message.checks[0].message = "Please fill in".into();
        assert!(!validation_config_equal(&base(), &message));

        let mut arg = base();
        arg.checks[1] = ValidationCheck::new("minLength", "Too short").with_arg("min", 4);
        assert!(!validation_config_equal(&base(), &arg));
    }

    #[test]
    fn check_order_matters() {
        let mut reversed = base();
        reversed.checks.reverse();
        assert!(!validation_config_equal(&base(), &reversed));
    }

    #[test]
    fn different_check_count_is_unequal() {
        let shorter = ValidationConfig::new()
            .on(ValidateOn::Blur)
            .check(ValidationCheck::new("required", "Required"));
        assert!(!validation_config_equal(&base(), &shorter));
    }

    #[test]
    fn state_refs_compare_by_path() {
        let a = DynamicValue::state("/password");
        assert!(dynamic_value_equal(&a, &DynamicValue::state("/password")));
        assert!(!dynamic_value_equal(&a, &DynamicValue::state("/confirm")));
    }

    #[test]
    fn literal_never_equals_state_ref() {
        let literal = DynamicValue::from("/password");
        let reference = DynamicValue::state("/password");
        assert!(!dynamic_value_equal(&literal, &reference));
        assert!(!dynamic_value_equal(&reference, &literal));
    }

    #[test]
    fn arg_key_sets_must_match() {
        let mut a = DynamicArgs::new();
        a.insert("min".into(), DynamicValue::from(1));
        let mut b = a.clone();
        assert!(dynamic_args_equal(&a, &b));

        b.insert("max".into(), DynamicValue::from(5));
        assert!(!dynamic_args_equal(&a, &b));

        let mut c = DynamicArgs::new();
        c.insert("max".into(), DynamicValue::from(1));
        assert!(!dynamic_args_equal(&a, &c));
    }

    #[test]
    fn empty_args_are_equal() {
        assert!(dynamic_args_equal(&DynamicArgs::new(), &DynamicArgs::new()));
    }

    #[test]
    fn null_literal_differs_from_missing_key() {
        let mut a = DynamicArgs::new();
        a.insert("x".into(), DynamicValue::Literal(Primitive::Null));
        assert!(!dynamic_args_equal(&a, &DynamicArgs::new()));
    }
}
