//! Formula value types

use std::fmt;

/// A value produced or consumed by formula evaluation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Absent cell value (a reference nobody supplied a value for)
    Empty,

    /// Explicit null
    Null,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value
    Number(f64),

    /// String value
    String(String),

    /// Nested sequence. Range blocks are an array of row arrays.
    Array(Vec<Value>),
}

impl Value {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        Value::String(s.into())
    }

    /// Build a 2-D block (rows of cells) as a nested array
    pub fn block(rows: Vec<Vec<Value>>) -> Self {
        Value::Array(rows.into_iter().map(Value::Array).collect())
    }

    /// Check if this is an absent cell value
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Check if this is an array
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Try to get the value as a number.
    ///
    /// Booleans count as 1/0, empty and null as 0, and strings only when they
    /// parse as a finite number (`"inf"` and `"NaN"` are text).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Boolean(true) => Some(1.0),
            Value::Boolean(false) => Some(0.0),
            Value::Empty | Value::Null => Some(0.0),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse::<f64>().ok().filter(|n| n.is_finite())
                }
            }
            Value::Array(_) => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Number(n) => Some(*n != 0.0),
            Value::Empty | Value::Null => Some(false),
            Value::String(s) => {
                if s.eq_ignore_ascii_case("TRUE") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("FALSE") {
                    Some(false)
                } else {
                    None
                }
            }
            Value::Array(_) => None,
        }
    }

    /// Display text used by concatenation and text functions
    pub fn as_text(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Boolean(true) => "TRUE".to_string(),
            Value::Boolean(false) => "FALSE".to_string(),
            Value::Empty | Value::Null => String::new(),
            Value::Array(items) => items
                .iter()
                .map(Value::as_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Scalar leaves of this value, depth first
    pub fn flatten(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        }
    }
}

fn collect_leaves<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_leaves(item, out);
            }
        }
        other => out.push(other),
    }
}

/// Format a number without a trailing `.0` for integral values
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Empty
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Array(_) => write!(f, "{{{}}}", self.as_text()),
            other => write!(f, "{}", other.as_text()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(42), Value::Number(42.0));
        assert_eq!(Value::from(3.5), Value::Number(3.5));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn test_value_as_number() {
        assert_eq!(Value::Number(42.0).as_number(), Some(42.0));
        assert_eq!(Value::Boolean(true).as_number(), Some(1.0));
        assert_eq!(Value::Empty.as_number(), Some(0.0));
        assert_eq!(Value::Null.as_number(), Some(0.0));
        assert_eq!(Value::string(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(Value::string("hello").as_number(), None);
        assert_eq!(Value::string("").as_number(), None);
        assert_eq!(Value::string("NaN").as_number(), None);
        assert_eq!(Value::string("inf").as_number(), None);
        assert_eq!(Value::string("-Infinity").as_number(), None);
        assert_eq!(Value::string("1e400").as_number(), None);
        assert_eq!(Value::from(vec![1]).as_number(), None);
    }

    #[test]
    fn test_value_as_text() {
        assert_eq!(Value::Number(3.0).as_text(), "3");
        assert_eq!(Value::Number(2.5).as_text(), "2.5");
        assert_eq!(Value::Boolean(false).as_text(), "FALSE");
        assert_eq!(Value::Null.as_text(), "");
    }

    #[test]
    fn test_flatten_nested() {
        let block = Value::block(vec![
            vec![Value::from(1), Value::from(2)],
            vec![Value::from(3)],
        ]);
        let leaves: Vec<f64> = block.flatten().iter().filter_map(|v| v.as_number()).collect();
        assert_eq!(leaves, vec![1.0, 2.0, 3.0]);
    }
}
