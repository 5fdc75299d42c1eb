//! Command payload parsing
//!
//! The second CLI argument is a JSON object. Anything else (malformed text,
//! arrays, scalars) becomes an empty payload; parsing never fails.

use serde_json::{Map, Value};

/// Payload used when the argument is omitted
pub const EMPTY_PAYLOAD: &str = "{}";

/// Parsed key/value parameters for a command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Parse raw argument text into a payload
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self(map),
            Ok(other) => {
                tracing::debug!(kind = kind(&other), "payload is not an object, using empty payload");
                Self::default()
            }
            Err(e) => {
                tracing::debug!("malformed payload ({}), using empty payload", e);
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String value, if the key holds a string
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// String value, treating an empty string as absent
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.str(key).filter(|s| !s.is_empty())
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Non-negative integer; floats are truncated
    pub fn u32(&self, key: &str) -> Option<u32> {
        let value = self.0.get(key)?;
        if let Some(n) = value.as_u64() {
            return u32::try_from(n).ok();
        }
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64)
            .map(|f| f as u32)
    }

    /// Compact JSON text of the payload
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object() {
        let payload = Payload::parse(r#"{"message":"hi","rate":150,"sound":false}"#);
        assert_eq!(payload.str("message"), Some("hi"));
        assert_eq!(payload.u32("rate"), Some(150));
        assert!(!payload.bool_or("sound", true));
    }

    #[test]
    fn test_malformed_and_non_object_are_empty() {
        for raw in ["", "{", "not json", "[1,2,3]", "\"text\"", "42", "null", "true", "{\"a\":}"] {
            assert!(Payload::parse(raw).is_empty(), "expected empty payload for {:?}", raw);
        }
    }

    #[test]
    fn test_omitted_payload_is_empty() {
        assert_eq!(Payload::parse(EMPTY_PAYLOAD), Payload::default());
    }

    #[test]
    fn test_absent_keys_use_defaults() {
        let payload = Payload::parse("{}");
        assert_eq!(payload.str("title"), None);
        assert!(payload.bool_or("sound", true));
        assert_eq!(payload.u32("rate"), None);
    }

    #[test]
    fn test_non_empty_str() {
        let payload = Payload::parse(r#"{"message":"","text":"x","count":3}"#);
        assert_eq!(payload.non_empty_str("message"), None);
        assert_eq!(payload.non_empty_str("text"), Some("x"));
        assert_eq!(payload.non_empty_str("count"), None);
    }

    #[test]
    fn test_rate_from_float_and_invalid() {
        assert_eq!(Payload::parse(r#"{"rate":180.7}"#).u32("rate"), Some(180));
        assert_eq!(Payload::parse(r#"{"rate":-5}"#).u32("rate"), None);
        assert_eq!(Payload::parse(r#"{"rate":"fast"}"#).u32("rate"), None);
    }

    #[test]
    fn test_to_json_is_compact() {
        let payload = Payload::parse("{ \"b\" : 1 ,  \"a\" : \"x\" }");
        assert_eq!(payload.to_json(), r#"{"a":"x","b":1}"#);
    }
}
