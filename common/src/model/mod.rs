//! Wire types exchanged with the card backend.
//!
//! Field names follow the backend's JSON (`snake_case`). Identifiers are kept
//! as strings on the client even when the backend emits numbers.

pub mod auth;
pub mod data;
pub mod generation;
pub mod suggestion;
pub mod template;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts either a JSON string or a JSON number and keeps it as a string.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Renders a JSON scalar the way it would appear in a spreadsheet cell.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extracts the human-readable `detail` of a backend error body.
///
/// `detail` is usually a string; validation failures send a list of objects
/// with a `msg` each, which are joined.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

/// Column headers may arrive as numbers or booleans; they are stringified.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values.iter().map(cell_text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_read_from_string_or_list() {
        assert_eq!(error_detail(r#"{"detail": "Template not found"}"#), Some("Template not found".into()));
        assert_eq!(
            error_detail(r#"{"detail": [{"loc": ["body"], "msg": "field required"}, {"msg": "bad"}]}"#),
            Some("field required; bad".into())
        );
        assert_eq!(error_detail(r#"{"detail": ""}"#), None);
        assert_eq!(error_detail("<html>502</html>"), None);
    }

    #[test]
    fn cells_render_like_spreadsheet_text() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&serde_json::json!("Asha")), "Asha");
        assert_eq!(cell_text(&serde_json::json!(17)), "17");
        assert_eq!(cell_text(&serde_json::json!(true)), "true");
    }
}
