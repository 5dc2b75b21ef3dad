//! Canonical serialization of hyperparameter values
//!
//! Hyperparameter deduplication keys on serialized text, so two
//! structurally equal values must serialize to the same bytes. Mapping
//! keys are written in sorted order regardless of the underlying map's
//! iteration order; array elements keep their order; scalars use compact
//! JSON text. The output is a lookup key, not a display form.

use serde_json::Value;

/// Serialize a value to its canonical text form.
///
/// Structurally equal values produce identical output:
///
/// ```rust
/// use perfilar::analysis::canonical_string;
/// use serde_json::json;
///
/// let a = canonical_string(&json!({"b": 1, "a": 2}));
/// let b = canonical_string(&json!({"a": 2, "b": 1}));
/// assert_eq!(a, b);
/// assert_eq!(a, r#"{"a":2,"b":1}"#);
/// ```
#[must_use]
pub fn canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, entry)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // JSON-escapes the key text
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(entry, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
