//! SVM Error Types
//!
//! Defines every error condition produced by the stack machine.
//! All of them are fatal to the current run; recovery belongs to the caller.

use std::io;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SvmError {
    // Stack discipline
    #[error("stack underflow")]
    StackUnderflow,

    // Dispatch
    #[error("unknown opcode: '{0}'")]
    UnknownOpcode(String),

    #[error("invalid jump target: {0}")]
    InvalidJumpTarget(String),

    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(u64),

    // Arithmetic and coercion
    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow in '{0}'")]
    ArithmeticOverflow(&'static str),

    #[error("cannot apply '{op}' to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("cannot convert '{0}' to an integer")]
    TypeCoercion(String),

    // Program text
    #[error("invalid integer literal: {0}")]
    InvalidLiteral(String),

    #[error("unexpected input at offset {offset}: {fragment}")]
    Lex { offset: usize, fragment: String },

    // Console boundary
    #[error("end of input")]
    EndOfInput,

    #[error("interrupted")]
    Interrupted,

    #[error("io error: {0}")]
    Io(String),
}

impl From<io::Error> for SvmError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::Interrupted => SvmError::Interrupted,
            io::ErrorKind::UnexpectedEof => SvmError::EndOfInput,
            _ => SvmError::Io(err.to_string()),
        }
    }
}

pub type SvmResult<T> = Result<T, SvmError>;
