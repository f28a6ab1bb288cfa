//! JSON parsing utilities for LLM responses.

use regex::Regex;
use serde_json::{Map, Value};

/// Remove `<think>...</think>` reasoning blocks from a model response.
pub fn strip_think_tags(text: &str) -> String {
    let think_re = Regex::new(r"(?s)<think>.*?</think>").unwrap();
    think_re.replace_all(text, "").to_string()
}

/// Extract the JSON object embedded in a model response.
///
/// Takes the widest `{...}` span in the text, so prose before or after
/// the object is tolerated. Returns `None` when no span parses as a
/// JSON object.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    if text.is_empty() {
        return None;
    }

    let cleaned = strip_think_tags(text);

    let object_re = Regex::new(r"(?s)\{.*\}").unwrap();
    let candidate = object_re.find(&cleaned)?;

    match serde_json::from_str::<Value>(candidate.as_str()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Pull a single attribute value out of a structured extraction result.
///
/// Checks the top level first, then one level of nested objects. String
/// values are trimmed; other values keep their JSON rendering. Returns
/// `None` when the key is absent or null everywhere.
pub fn lookup_attribute(result: &Map<String, Value>, attribute_key: &str) -> Option<String> {
    if let Some(value) = result.get(attribute_key) {
        if !value.is_null() {
            return Some(value_text(value));
        }
    }

    for nested in result.values() {
        if let Value::Object(inner) = nested {
            if let Some(value) = inner.get(attribute_key) {
                if !value.is_null() {
                    return Some(value_text(value));
                }
            }
        }
    }

    None
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_think_tags_multiline() {
        let input = "<think>\nthe part looks\nlike a header\n</think>{\"Gender\": \"male\"}";
        assert_eq!(strip_think_tags(input), "{\"Gender\": \"male\"}");
    }

    #[test]
    fn test_extract_object_with_surrounding_prose() {
        let input = "Sure, here is the answer:\n{\"Gender\": \"female\"}\nDone.";
        let map = extract_json_object(input).unwrap();
        assert_eq!(map.get("Gender").unwrap(), "female");
    }

    #[test]
    fn test_extract_object_is_greedy() {
        let input = r#"{"outer": {"Gender": "male"}}"#;
        let map = extract_json_object(input).unwrap();
        assert!(map.contains_key("outer"));
    }

    #[test]
    fn test_extract_object_rejects_invalid_json() {
        assert!(extract_json_object("{not json at all").is_none());
        assert!(extract_json_object("no braces here").is_none());
        assert!(extract_json_object("").is_none());
    }

    #[test]
    fn test_lookup_top_level() {
        let map = serde_json::from_str(r#"{"Gender": " male "}"#).unwrap();
        assert_eq!(lookup_attribute(&map, "Gender").unwrap(), "male");
    }

    #[test]
    fn test_lookup_nested_one_level() {
        let map = serde_json::from_str(r#"{"attributes": {"Gender": "female"}}"#).unwrap();
        assert_eq!(lookup_attribute(&map, "Gender").unwrap(), "female");
    }

    #[test]
    fn test_lookup_null_top_level_falls_through_to_nested() {
        let map =
            serde_json::from_str(r#"{"Gender": null, "attributes": {"Gender": "male"}}"#).unwrap();
        assert_eq!(lookup_attribute(&map, "Gender").unwrap(), "male");
    }

    #[test]
    fn test_lookup_missing_key() {
        let map = serde_json::from_str(r#"{"Colour": "000 bk"}"#).unwrap();
        assert!(lookup_attribute(&map, "Gender").is_none());
    }

    #[test]
    fn test_lookup_renders_numbers_as_json() {
        let map = serde_json::from_str(r#"{"Number Of Cavities": 12}"#).unwrap();
        assert_eq!(lookup_attribute(&map, "Number Of Cavities").unwrap(), "12");
    }
}
