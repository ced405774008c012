//! Output policy for rendering result documents (v0.1)

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Output policy configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutputPolicy {
    /// Output format (pretty JSON by default)
    pub format: OutputFormat,

    /// Sort record keys instead of keeping insertion order
    pub sort_keys: bool,
}

/// Output format enum
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single-line JSON
    Json,

    /// Indented JSON (default)
    #[default]
    Pretty,

    /// YAML
    Yaml,
}

impl OutputPolicy {
    pub fn render(&self, value: &Value) -> Result<String> {
        let sorted;
        let value = if self.sort_keys {
            sorted = sort_keys(value);
            &sorted
        } else {
            value
        };

        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        })
    }
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect::<Map<_, _>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_yaml_format() {
        let yaml = "format: yaml";
        let policy: OutputPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.format, OutputFormat::Yaml);
        assert!(!policy.sort_keys);
    }

    #[test]
    fn parse_json_with_sorted_keys() {
        let yaml = r#"
            format: json
            sort_keys: true
        "#;
        let policy: OutputPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.format, OutputFormat::Json);
        assert!(policy.sort_keys);
    }

    #[test]
    fn default_is_pretty() {
        let policy = OutputPolicy::default();
        assert_eq!(policy.format, OutputFormat::Pretty);
    }

    #[test]
    fn render_keeps_insertion_order() {
        let policy = OutputPolicy {
            format: OutputFormat::Json,
            sort_keys: false,
        };
        let out = policy.render(&json!({"b": 1, "a": [2]})).unwrap();
        assert_eq!(out, r#"{"b":1,"a":[2]}"#);
    }

    #[test]
    fn render_sorted_nested() {
        let policy = OutputPolicy {
            format: OutputFormat::Json,
            sort_keys: true,
        };
        let out = policy.render(&json!({"b": {"z": 1, "y": 2}, "a": [{"d": 1, "c": 2}]})).unwrap();
        assert_eq!(out, r#"{"a":[{"c":2,"d":1}],"b":{"y":2,"z":1}}"#);
    }

    #[test]
    fn render_yaml() {
        let policy = OutputPolicy {
            format: OutputFormat::Yaml,
            sort_keys: false,
        };
        let out = policy.render(&json!({"a": 1})).unwrap();
        assert_eq!(out.trim(), "a: 1");
    }
}
