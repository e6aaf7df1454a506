//! Payload unwrapping for the analysis backend's response.
//!
//! The webhook has returned its payload in every shape imaginable across
//! backend versions: a plain object, a single-element array, a JSON string
//! (sometimes fenced in markdown or triple quotes), a chat-completion wrapper
//! with the real payload inside `message.content`, and generic pass-through
//! wrappers. This module is the ordered pipeline that reduces all of those to
//! one object, then locates the requested section anywhere inside it.
//!
//! Everything is total: unrecognized input reduces to `Value::Null` and the
//! normalizers turn that into an empty record.

use serde_json::{Map, Value};

pub const SECTION_RESUME: &str = "resume_analysis";
pub const SECTION_SCENARIO: &str = "interview_scenario";

const SECTION_KEYS: [&str; 2] = [SECTION_RESUME, SECTION_SCENARIO];

/// Wrapper keys some backend versions nest the whole payload under.
/// `"object Object"` is a stringified-JS artifact observed in the wild.
const PASSTHROUGH_KEYS: [&str; 2] = ["json", "object Object"];

/// Strips one layer of markdown or triple-quote fencing around a JSON body.
pub fn strip_fences(text: &str) -> &str {
    let fences = [
        ("```json", "```"),
        ("```", "```"),
        ("\"\"\"json", "\"\"\""),
        ("\"\"\"", "\"\"\""),
    ];
    let mut s = text.trim();
    for (open, close) in fences {
        if let Some(stripped) = s.strip_prefix(open) {
            s = stripped.trim_start();
            if let Some(stripped) = s.strip_suffix(close) {
                s = stripped.trim_end();
            }
            break;
        }
    }
    s
}

/// Fence-strips and JSON-parses a string payload.
pub fn decode_text(text: &str) -> Option<Value> {
    serde_json::from_str(strip_fences(text)).ok()
}

/// Runs the ordered unwrapping stages, reducing any recognized response shape
/// to one object.
fn unwrap_payload(raw: &Value) -> Option<Map<String, Value>> {
    let mut value = raw.clone();

    if let Value::String(s) = &value {
        value = decode_text(s)?;
    }

    if let Value::Array(items) = &value {
        if items.len() == 1 {
            value = items[0].clone();
            if let Value::String(s) = &value {
                value = decode_text(s)?;
            }
        }
    }

    let mut obj = value.as_object()?.clone();

    // chat-completion wrapper: the real payload is a string at message.content
    if let Some(content) = obj
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
    {
        if let Some(inner) = decode_text(content).and_then(|v| v.as_object().cloned()) {
            obj = inner;
        }
    }

    // generic pass-through wrappers unwrap exactly one level
    for key in PASSTHROUGH_KEYS {
        if let Some(inner) = obj.get(key).and_then(Value::as_object) {
            obj = inner.clone();
            break;
        }
    }

    Some(obj)
}

/// Depth-first search for the first object carrying either section key.
fn find_section_holder(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => {
            if SECTION_KEYS.iter().any(|k| map.contains_key(*k)) {
                return Some(map);
            }
            map.values().find_map(find_section_holder)
        }
        Value::Array(items) => items.iter().find_map(find_section_holder),
        _ => None,
    }
}

/// Extracts the named section (`resume_analysis` or `interview_scenario`)
/// from wherever it sits in the payload. When no section key exists at any
/// depth the whole unwrapped object is returned as a best-effort target.
pub fn section(raw: &Value, key: &str) -> Value {
    let Some(obj) = unwrap_payload(raw) else {
        return Value::Null;
    };
    let unwrapped = Value::Object(obj);
    if let Some(holder) = find_section_holder(&unwrapped) {
        if let Some(found) = holder.get(key) {
            return found.clone();
        }
    }
    unwrapped
}

/// Reduces a section value to an object map: objects pass through, string
/// sections get one more fence-strip-and-parse, anything else is empty.
pub fn object_like(raw: &Value) -> Map<String, Value> {
    match raw {
        Value::Object(map) => map.clone(),
        Value::String(s) => decode_text(s)
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_default(),
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_fences_markdown_json_tag() {
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_markdown_untagged() {
        assert_eq!(strip_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_triple_quote() {
        assert_eq!(strip_fences("\"\"\"json\n{\"a\":1}\n\"\"\""), "{\"a\":1}");
        assert_eq!(strip_fences("\"\"\"{\"a\":1}\"\"\""), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_unclosed_fence_still_strips_prefix() {
        assert_eq!(strip_fences("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_plain_text_untouched() {
        assert_eq!(strip_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_section_from_plain_object() {
        let raw = json!({"resume_analysis": {"total_score": 20}});
        assert_eq!(
            section(&raw, SECTION_RESUME),
            json!({"total_score": 20})
        );
    }

    #[test]
    fn test_section_from_fenced_string_payload() {
        let raw = json!("```json\n{\"resume_analysis\":{\"total_score\":5}}\n```");
        assert_eq!(section(&raw, SECTION_RESUME), json!({"total_score": 5}));
    }

    #[test]
    fn test_section_from_single_element_array() {
        let raw = json!([{"resume_analysis": {"total_score": 9}}]);
        assert_eq!(section(&raw, SECTION_RESUME), json!({"total_score": 9}));
    }

    #[test]
    fn test_section_from_chat_content_wrapper() {
        let raw = json!({
            "message": {
                "content": "```json\n{\"interview_scenario\":{\"questions\":[\"q1\"]}}\n```"
            }
        });
        assert_eq!(
            section(&raw, SECTION_SCENARIO),
            json!({"questions": ["q1"]})
        );
    }

    #[test]
    fn test_section_from_json_passthrough_wrapper() {
        let raw = json!({"json": {"resume_analysis": {"total_score": 11}}});
        assert_eq!(section(&raw, SECTION_RESUME), json!({"total_score": 11}));
    }

    #[test]
    fn test_section_from_object_object_wrapper() {
        let raw = json!({"object Object": {"resume_analysis": {"total_score": 3}}});
        assert_eq!(section(&raw, SECTION_RESUME), json!({"total_score": 3}));
    }

    #[test]
    fn test_section_found_by_deep_search() {
        let raw = json!({
            "output": {"items": [{"data": {"resume_analysis": {"total_score": 17}}}]}
        });
        assert_eq!(section(&raw, SECTION_RESUME), json!({"total_score": 17}));
    }

    #[test]
    fn test_section_falls_back_to_whole_object() {
        // no section key anywhere: the payload itself is the best-effort target
        let raw = json!({"total_score": 8});
        assert_eq!(section(&raw, SECTION_RESUME), raw);
    }

    #[test]
    fn test_section_of_garbage_string_is_null() {
        let raw = json!("this is not JSON at all");
        assert_eq!(section(&raw, SECTION_RESUME), Value::Null);
    }

    #[test]
    fn test_section_of_null_is_null() {
        assert_eq!(section(&Value::Null, SECTION_RESUME), Value::Null);
    }

    #[test]
    fn test_object_like_parses_string_sections() {
        let raw = json!("{\"total_score\": 4}");
        let map = object_like(&raw);
        assert_eq!(map.get("total_score"), Some(&json!(4)));
    }

    #[test]
    fn test_object_like_of_scalar_is_empty() {
        assert!(object_like(&json!(42)).is_empty());
        assert!(object_like(&Value::Null).is_empty());
    }
}
