//! Operand Stack Implementation
//!
//! LIFO working area for the machine.
//! No execution semantics.

use std::slice;

use crate::error::{SvmError, SvmResult};
use super::value::Value;

/// Machine operand stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    /// Create an empty stack
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    /// Push value onto stack
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pop value from stack
    pub fn pop(&mut self) -> SvmResult<Value> {
        self.values.pop().ok_or(SvmError::StackUnderflow)
    }

    /// Peek at top of stack without removing
    pub fn peek(&self) -> SvmResult<&Value> {
        self.values.last().ok_or(SvmError::StackUnderflow)
    }

    /// Duplicate top value
    pub fn dup(&mut self) -> SvmResult<()> {
        let value = self.peek()?.clone();
        self.push(value);
        Ok(())
    }

    /// Get current stack size
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values from bottom to top
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Stack {
    fn from(values: Vec<Value>) -> Self {
        Stack { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_on_empty_underflows() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(SvmError::StackUnderflow));
        assert_eq!(stack.peek(), Err(SvmError::StackUnderflow));
    }

    #[test]
    fn lifo_order() {
        let mut stack = Stack::new();
        stack.push(Value::Integer(1));
        stack.push(Value::from("two"));
        assert_eq!(stack.peek(), Ok(&Value::from("two")));
        assert_eq!(stack.pop(), Ok(Value::from("two")));
        assert_eq!(stack.pop(), Ok(Value::Integer(1)));
        assert!(stack.is_empty());
    }

    #[test]
    fn dup_copies_top() {
        let mut stack = Stack::from(vec![Value::Integer(5)]);
        stack.dup().expect("dup failed");
        assert_eq!(stack.as_slice(), &[Value::Integer(5), Value::Integer(5)]);
    }
}
