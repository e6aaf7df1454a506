//! Loose value coercions shared by the normalizers.
//!
//! Backends have shipped scores as numbers, numeric strings, and
//! `{"score": 4}`-style wrappers, and lists as arrays of strings, numbers,
//! or labeled objects. Everything here is total: bad input coerces to `None`
//! or drops out of the list, never errors.

use serde_json::{Map, Value};

/// Wrapper keys under which a bare number has been observed to hide.
const NUMBER_WRAPPER_KEYS: [&str; 5] = ["score", "value", "point", "points", "val"];

/// Object keys tried, in order, when reducing a labeled object to a string.
const LABEL_KEYS: [&str; 5] = ["title", "name", "label", "text", "reason"];

/// First alias present in `map` with a non-null value.
pub fn pick<'a>(map: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Coerces a value to a finite number: native number, numeric string, or an
/// object carrying the number under one wrapper key (one level only).
pub fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Object(map) => NUMBER_WRAPPER_KEYS
            .iter()
            .filter_map(|k| map.get(*k))
            .find_map(scalar_number),
        other => scalar_number(other),
    }
}

/// Reduces one list element to a display string. Labeled objects collapse to
/// their first label key; anything else falls back to compact JSON. Null and
/// empty strings drop out.
fn display_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => LABEL_KEYS
            .iter()
            .filter_map(|k| map.get(*k))
            .find_map(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| value.to_string()),
        Value::Array(_) => value.to_string(),
    };
    let s = s.trim().to_string();
    (!s.is_empty()).then_some(s)
}

/// Coerces a mixed-type array into a list of non-empty strings.
/// Non-arrays coerce to the empty list.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(display_string).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_like_accepts_native_numbers() {
        assert_eq!(number_like(&json!(4)), Some(4.0));
        assert_eq!(number_like(&json!(2.5)), Some(2.5));
    }

    #[test]
    fn test_number_like_parses_numeric_strings() {
        assert_eq!(number_like(&json!("3")), Some(3.0));
        assert_eq!(number_like(&json!(" 4.5 ")), Some(4.5));
        assert_eq!(number_like(&json!("four")), None);
        assert_eq!(number_like(&json!("NaN")), None);
    }

    #[test]
    fn test_number_like_unwraps_score_objects_one_level() {
        assert_eq!(number_like(&json!({"score": 4})), Some(4.0));
        assert_eq!(number_like(&json!({"value": "3"})), Some(3.0));
        assert_eq!(number_like(&json!({"points": 2})), Some(2.0));
        // nested wrappers do not recurse further
        assert_eq!(number_like(&json!({"score": {"value": 4}})), None);
    }

    #[test]
    fn test_number_like_rejects_other_shapes() {
        assert_eq!(number_like(&json!(null)), None);
        assert_eq!(number_like(&json!(true)), None);
        assert_eq!(number_like(&json!([4])), None);
        assert_eq!(number_like(&json!({"unrelated": 4})), None);
    }

    #[test]
    fn test_pick_skips_null_aliases() {
        let map = json!({"score": null, "total_score": 7});
        let map = map.as_object().unwrap();
        let v = pick(map, &["score", "total_score"]).unwrap();
        assert_eq!(v, &json!(7));
    }

    #[test]
    fn test_pick_returns_none_when_all_absent() {
        let map = json!({"other": 1});
        assert!(pick(map.as_object().unwrap(), &["a", "b"]).is_none());
    }

    #[test]
    fn test_string_list_passes_strings_and_stringifies_numbers() {
        let v = json!(["alpha", 7, "beta"]);
        assert_eq!(string_list(Some(&v)), vec!["alpha", "7", "beta"]);
    }

    #[test]
    fn test_string_list_reduces_labeled_objects() {
        let v = json!([
            {"title": "Led a launch"},
            {"reason": "No team experience"},
            {"weight": 3}
        ]);
        let out = string_list(Some(&v));
        assert_eq!(out[0], "Led a launch");
        assert_eq!(out[1], "No team experience");
        // unlabeled objects fall back to compact JSON rather than dropping
        assert_eq!(out[2], r#"{"weight":3}"#);
    }

    #[test]
    fn test_string_list_filters_null_and_empty() {
        let v = json!(["keep", null, "", "  "]);
        assert_eq!(string_list(Some(&v)), vec!["keep"]);
    }

    #[test]
    fn test_string_list_of_non_array_is_empty() {
        assert!(string_list(Some(&json!("loose text"))).is_empty());
        assert!(string_list(None).is_empty());
    }
}
