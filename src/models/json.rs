//! Lenient field access on decoded JSON.

use serde_json::{Map, Value};

use crate::error::{Result, ZanataError};

pub(crate) type Object = Map<String, Value>;

pub(crate) fn root_array(root: &Value) -> Result<&Vec<Value>> {
    root.as_array()
        .ok_or_else(|| ZanataError::InvalidResponse("root element is not an array".to_string()))
}

pub(crate) fn root_object(root: &Value) -> Result<&Object> {
    root.as_object()
        .ok_or_else(|| ZanataError::InvalidResponse("root element is not an object".to_string()))
}

pub(crate) fn string_member<'a>(object: &'a Object, name: &str) -> Option<&'a str> {
    object.get(name).and_then(Value::as_str)
}

pub(crate) fn array_member<'a>(object: &'a Object, name: &str) -> Option<&'a Vec<Value>> {
    object.get(name).and_then(Value::as_array)
}

/// Like [`string_member`], but a missing field is an error naming it.
pub(crate) fn required_string<'a>(object: &'a Object, name: &str) -> Result<&'a str> {
    string_member(object, name).ok_or_else(|| missing(name))
}

pub(crate) fn required_array<'a>(object: &'a Object, name: &str) -> Result<&'a Vec<Value>> {
    array_member(object, name).ok_or_else(|| missing(name))
}

/// The string elements of `array`; anything else is skipped.
pub(crate) fn strings(array: &[Value]) -> Vec<String> {
    array
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn missing(name: &str) -> ZanataError {
    ZanataError::InvalidResponse(format!("\"{name}\" is not given"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strings_skips_non_strings() {
        let value = json!(["a", 1, null, "b", {"c": "d"}]);
        assert_eq!(strings(value.as_array().unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_required_string_names_field() {
        let value = json!({"id": 3});
        let err = required_string(value.as_object().unwrap(), "id").unwrap_err();
        assert_eq!(err.to_string(), "Invalid response: \"id\" is not given");
    }

    #[test]
    fn test_root_checks() {
        assert!(root_array(&json!({})).is_err());
        assert!(root_object(&json!([])).is_err());
        assert!(root_array(&json!([])).is_ok());
    }
}
