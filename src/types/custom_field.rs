use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Custom field value attached to a user. Multi-value fields carry an array.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CustomField {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    #[serde(default)]
    pub value: Value,
}

impl CustomField {
    /// Render the value for display, joining multi-value fields with ", ".
    pub fn display_value(&self) -> String {
        match &self.value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value_multiple() {
        let field: CustomField = serde_json::from_str(
            r#"{"id": 1, "name": "Skills", "multiple": true, "value": ["rust", "go"]}"#,
        )
        .unwrap();
        assert_eq!(field.display_value(), "rust, go");
    }

    #[test]
    fn test_display_value_missing() {
        let field: CustomField = serde_json::from_str(r#"{"id": 2, "name": "Empty"}"#).unwrap();
        assert_eq!(field.display_value(), "");
    }
}
