//! Keyword argument helpers for skill bodies.

use anyhow::{anyhow, bail};
use serde_json::Value;

use super::body::Kwargs;

/// Build a keyword argument map from `(name, value)` pairs.
///
/// ```
/// use autolearn_core::skill::kwargs;
/// use serde_json::json;
///
/// let args = kwargs([("a", json!(1)), ("b", json!(2))]);
/// assert_eq!(args["b"], json!(2));
/// ```
pub fn kwargs<I, K>(pairs: I) -> Kwargs
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Typed accessors with descriptive errors, for use inside skill bodies.
pub trait KwargsExt {
    fn optional(&self, key: &str) -> Option<&Value>;

    fn require(&self, key: &str) -> anyhow::Result<&Value> {
        self.optional(key)
            .ok_or_else(|| anyhow!("missing required argument '{key}'"))
    }

    fn require_f64(&self, key: &str) -> anyhow::Result<f64> {
        match self.require(key)? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| anyhow!("argument '{key}' is not representable as f64")),
            other => bail!("argument '{key}' must be a number, got {}", type_name(other)),
        }
    }

    fn require_str(&self, key: &str) -> anyhow::Result<&str> {
        match self.require(key)? {
            Value::String(s) => Ok(s),
            other => bail!("argument '{key}' must be a string, got {}", type_name(other)),
        }
    }

    fn require_bool(&self, key: &str) -> anyhow::Result<bool> {
        match self.require(key)? {
            Value::Bool(b) => Ok(*b),
            other => bail!("argument '{key}' must be a boolean, got {}", type_name(other)),
        }
    }
}

impl KwargsExt for Kwargs {
    fn optional(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
