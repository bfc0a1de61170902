//! Program Element Representation
//!
//! A single slot of a program: a literal, a known operation, or an
//! unrecognized word that only fails once the machine reaches it.

use std::fmt;

use crate::error::{SvmError, SvmResult};
use crate::vm::value::Value;
use super::op::Op;

const QUOTES: [char; 2] = ['"', '\''];

/// Program element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Pushed verbatim when executed
    Literal(Value),

    /// Named operation
    Op(Op),

    /// Neither a literal nor a known operation
    Word(String),
}

impl Element {
    /// Classify a raw source token.
    ///
    /// A token wrapped in the same quote character at both ends is a text
    /// literal with the delimiters stripped once.
    pub fn parse(token: &str) -> SvmResult<Self> {
        if let Some(text) = strip_quotes(token) {
            return Ok(Element::Literal(Value::Text(text.to_string())));
        }
        if let Some(op) = Op::from_name(token) {
            return Ok(Element::Op(op));
        }
        if is_integer_literal(token) {
            return token
                .parse::<i64>()
                .map(|n| Element::Literal(Value::Integer(n)))
                .map_err(|_| SvmError::InvalidLiteral(token.to_string()));
        }
        Ok(Element::Word(token.to_string()))
    }

    pub fn integer(n: i64) -> Self {
        Element::Literal(Value::Integer(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Element::Literal(Value::Text(s.into()))
    }

    /// Integer payload if this is an integer literal
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Element::Literal(value) => value.as_integer(),
            _ => None,
        }
    }

    pub fn as_op(&self) -> Option<Op> {
        match self {
            Element::Op(op) => Some(*op),
            _ => None,
        }
    }
}

fn strip_quotes(token: &str) -> Option<&str> {
    let first = token.chars().next()?;
    if token.len() < 2 || !QUOTES.contains(&first) || !token.ends_with(first) {
        return None;
    }
    Some(&token[1..token.len() - 1])
}

fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Literal(Value::Integer(n)) => write!(f, "{}", n),
            Element::Literal(Value::Text(s)) if s.contains('"') => write!(f, "'{}'", s),
            Element::Literal(Value::Text(s)) => write!(f, "\"{}\"", s),
            Element::Op(op) => write!(f, "{}", op),
            Element::Word(w) => f.write_str(w),
        }
    }
}

impl From<i64> for Element {
    fn from(n: i64) -> Self {
        Element::integer(n)
    }
}

impl From<Op> for Element {
    fn from(op: Op) -> Self {
        Element::Op(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_are_stripped_once() {
        assert_eq!(Element::parse("\"hi there\"").unwrap(), Element::text("hi there"));
        assert_eq!(Element::parse("'\"x\"'").unwrap(), Element::text("\"x\""));
        assert_eq!(Element::parse("\"\"").unwrap(), Element::text(""));
    }

    #[test]
    fn unbalanced_quotes_are_words() {
        assert_eq!(Element::parse("\"").unwrap(), Element::Word("\"".into()));
        assert_eq!(Element::parse("\"abc'").unwrap(), Element::Word("\"abc'".into()));
    }

    #[test]
    fn integers_and_operations() {
        assert_eq!(Element::parse("-42").unwrap(), Element::integer(-42));
        assert_eq!(Element::parse("-").unwrap(), Element::Op(Op::Sub));
        assert_eq!(Element::parse("swap").unwrap(), Element::Op(Op::Swap));
        assert_eq!(Element::parse("4x").unwrap(), Element::Word("4x".into()));
    }

    #[test]
    fn oversized_integer_is_rejected() {
        assert_eq!(
            Element::parse("99999999999999999999"),
            Err(SvmError::InvalidLiteral("99999999999999999999".into()))
        );
    }
}
