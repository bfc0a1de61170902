//! Runtime Value Representation
//!
//! Defines the tagged values the machine operates on.
//! Equality is tag-preserving; conversions between tags are explicit.

use std::fmt;

use crate::error::{SvmError, SvmResult};

/// Runtime value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Signed 64-bit integer
    Integer(i64),

    /// Immutable text
    Text(String),
}

impl Value {
    /// Short tag name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "int",
            Value::Text(_) => "str",
        }
    }

    /// Nonzero integers and nonempty text are true
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer(n) => *n != 0,
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// Convert to an integer, parsing text as a signed decimal literal.
    ///
    /// Surrounding whitespace is ignored, so a line read from the console
    /// can be cast directly.
    pub fn to_integer(&self) -> SvmResult<i64> {
        match self {
            Value::Integer(n) => Ok(*n),
            Value::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| SvmError::TypeCoercion(s.clone())),
        }
    }

    /// Canonical text rendering
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_preserves_tag() {
        assert_ne!(Value::Integer(7), Value::Text("7".into()));
        assert_eq!(Value::Integer(7).to_text(), "7");
    }

    #[test]
    fn text_coerces_with_whitespace() {
        assert_eq!(Value::from(" -12\n").to_integer(), Ok(-12));
        assert_eq!(
            Value::from("twelve").to_integer(),
            Err(SvmError::TypeCoercion("twelve".into()))
        );
    }

    #[test]
    fn truthiness() {
        assert!(Value::Integer(-1).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(!Value::from("").is_truthy());
    }
}
