//! Cell-level diffing against the default target.
//!
//! The exported table shows variance, not repetition: a non-default cell
//! is emitted only when its value differs from the default target's. These
//! are pure functions over [`Value`]; the emitter applies them per cell.

use ps_core::{Value, ValueKind};

/// Compares two values the way the table does.
///
/// Scalars compare by their rendered text, so numeric `1` equals string
/// `"1"` (accepted imprecision). Aggregates compare by deep structural
/// equality. A scalar never equals an aggregate.
#[must_use]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    if a.is_scalar() && b.is_scalar() {
        a.render() == b.render()
    } else {
        a == b
    }
}

/// Decides the emitted text of one cell, `None` meaning an empty field.
///
/// The default target's own column always shows its value. A non-default
/// cell is empty when the target recorded no value, or when its value
/// matches the default's; otherwise it shows the target's rendered value.
/// Without a recorded default value nothing is suppressed.
#[must_use]
pub fn cell(
    default: Option<&Value>,
    value: Option<&Value>,
    is_default_column: bool,
) -> Option<String> {
    let value = value?;
    if is_default_column {
        return Some(value.render());
    }
    match default {
        Some(default) if values_equal(default, value) => None,
        _ => Some(value.render()),
    }
}

/// Derives the row's type label from the first present value.
///
/// `values` must iterate in column order; the first target that supplied a
/// usable value decides the category. Returns `None` when no target holds
/// a value, leaving the type cell blank.
#[must_use]
pub fn row_type<'a, I>(values: I) -> Option<ValueKind>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    values.into_iter().flatten().next().map(Value::kind)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_scalars_compare_by_rendered_text() {
        assert!(values_equal(&Value::from("1"), &Value::from(1.0)));
        assert!(values_equal(&Value::from("true"), &Value::from(true)));
        assert!(!values_equal(&Value::from("1.0"), &Value::from("2.0")));
    }

    #[test]
    fn test_aggregates_compare_structurally() {
        let a = Value::Array(vec![Value::from(1i64)]);
        let b = Value::Array(vec![Value::from(1i64)]);
        let c = Value::Array(vec![Value::from(2i64)]);
        assert!(values_equal(&a, &b));
        assert!(!values_equal(&a, &c));
    }

    #[test]
    fn test_scalar_never_equals_aggregate() {
        let scalar = Value::from("[]");
        let aggregate = Value::Array(vec![]);
        assert!(!values_equal(&scalar, &aggregate));
    }

    #[test]
    fn test_default_column_always_shows_its_value() {
        let value = Value::from("1.0");
        assert_eq!(
            cell(Some(&value), Some(&value), true),
            Some("1.0".to_owned())
        );
    }

    #[test]
    fn test_matching_value_is_suppressed() {
        let default = Value::from("1.0");
        let same = Value::from("1.0");
        assert_eq!(cell(Some(&default), Some(&same), false), None);
    }

    #[test]
    fn test_differing_value_is_emitted() {
        let default = Value::from("1.0");
        let other = Value::from("2.0");
        assert_eq!(
            cell(Some(&default), Some(&other), false),
            Some("2.0".to_owned())
        );
    }

    #[test]
    fn test_missing_value_is_empty() {
        let default = Value::from("1.0");
        assert_eq!(cell(Some(&default), None, false), None);
        assert_eq!(cell(Some(&default), None, true), None);
    }

    #[test]
    fn test_no_default_suppresses_nothing() {
        let value = Value::from("1.0");
        assert_eq!(cell(None, Some(&value), false), Some("1.0".to_owned()));
    }

    #[test]
    fn test_row_type_uses_first_present_value() {
        let number = Value::from(7i64);
        let text = Value::from("7");
        let kind = row_type([None, Some(&number), Some(&text)]);
        assert_eq!(kind, Some(ValueKind::Number));
    }

    #[test]
    fn test_row_type_blank_without_values() {
        assert_eq!(row_type([None, None]), None);
    }

    #[test]
    fn test_row_type_labels_aggregates() {
        let dict = Value::Dict(BTreeMap::new());
        assert_eq!(row_type([Some(&dict)]), Some(ValueKind::Dictionary));
    }
}
