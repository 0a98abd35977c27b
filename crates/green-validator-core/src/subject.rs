//! The value being validated.
//!
//! A subject is any primitive-ish value a caller hands to the validator:
//! text, numbers, booleans, null, or a flat list of those. Every
//! string-based rule works on the subject's string form (see [`fmt::Display`]),
//! and every failure message starts with it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rules::patterns::NUMERIC_PATTERN;

/// A value under validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    /// Absent value.
    Null,

    /// A boolean.
    Bool(bool),

    /// An integer.
    Int(i64),

    /// A floating-point number.
    Float(f64),

    /// A string.
    Text(String),

    /// A collection of values.
    List(Vec<Subject>),
}

impl Subject {
    /// Borrow the text of a `Text` subject.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Subject::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Subject::Null)
    }

    /// Whether the subject is a number or a numeric string.
    ///
    /// Numeric strings may carry surrounding whitespace, a sign, a fraction
    /// and an exponent. `inf`/`nan` spellings are not numeric.
    pub fn is_numeric(&self) -> bool {
        match self {
            Subject::Int(_) => true,
            Subject::Float(value) => value.is_finite(),
            Subject::Text(text) => NUMERIC_PATTERN.is_match(text.trim_matches(is_ascii_space)),
            _ => false,
        }
    }

    /// Numeric value of the subject, if it [`is_numeric`](Self::is_numeric).
    pub fn as_f64(&self) -> Option<f64> {
        if !self.is_numeric() {
            return None;
        }

        match self {
            Subject::Int(value) => Some(*value as f64),
            Subject::Float(value) => Some(*value),
            Subject::Text(text) => text.trim_matches(is_ascii_space).parse().ok(),
            _ => None,
        }
    }
}

/// Whitespace set trimmed from numeric strings.
pub(crate) fn is_ascii_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Null | Subject::Bool(false) => Ok(()),
            Subject::Bool(true) => f.write_str("1"),
            Subject::Int(value) => write!(f, "{}", value),
            Subject::Float(value) => write!(f, "{}", value),
            Subject::Text(text) => f.write_str(text),
            Subject::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Subject {
    fn from(value: &str) -> Self {
        Subject::Text(value.to_string())
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        Subject::Text(value)
    }
}

impl From<&String> for Subject {
    fn from(value: &String) -> Self {
        Subject::Text(value.clone())
    }
}

impl From<bool> for Subject {
    fn from(value: bool) -> Self {
        Subject::Bool(value)
    }
}

macro_rules! subject_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Subject {
                fn from(value: $ty) -> Self {
                    Subject::Int(i64::from(value))
                }
            }
        )*
    };
}

subject_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Subject {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Subject::Int)
            .unwrap_or(Subject::Float(value as f64))
    }
}

impl From<usize> for Subject {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(Subject::Int)
            .unwrap_or(Subject::Float(value as f64))
    }
}

impl From<f32> for Subject {
    fn from(value: f32) -> Self {
        Subject::Float(f64::from(value))
    }
}

impl From<f64> for Subject {
    fn from(value: f64) -> Self {
        Subject::Float(value)
    }
}

impl<T: Into<Subject>> From<Option<T>> for Subject {
    fn from(value: Option<T>) -> Self {
        value.map_or(Subject::Null, Into::into)
    }
}

impl<T: Into<Subject>> From<Vec<T>> for Subject {
    fn from(values: Vec<T>) -> Self {
        Subject::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Subject {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Subject::Null,
            Value::Bool(b) => Subject::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Subject::Int(i),
                None => n.as_f64().map_or(Subject::Null, Subject::Float),
            },
            Value::String(s) => Subject::Text(s),
            Value::Array(items) => Subject::List(items.into_iter().map(Subject::from).collect()),
            // Objects are not primitive; keep their JSON text.
            object @ Value::Object(_) => Subject::Text(object.to_string()),
        }
    }
}
