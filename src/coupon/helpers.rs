//! Coupon Payload Helpers

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Normalizes a rules payload to its serialized JSON text.
///
/// Clients may send the rules either as a JSON string holding the payload or
/// as an inline object. Strings are kept verbatim so that an unparsable
/// payload is stored as written and later treated as malformed.
pub fn normalize_rules(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `deserialize_with` adapter for [`normalize_rules`]
pub fn deserialize_rules<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(normalize_rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_rules() {
        assert_eq!(
            normalize_rules(json!("{\"minAmount\":500}")),
            "{\"minAmount\":500}"
        );
        assert_eq!(
            normalize_rules(json!({ "minAmount": 500 })),
            "{\"minAmount\":500}"
        );
        assert_eq!(normalize_rules(json!("not json")), "not json");
        assert_eq!(normalize_rules(Value::Null), "");
    }
}
