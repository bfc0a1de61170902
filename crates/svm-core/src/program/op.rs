//! Operation Vocabulary
//!
//! Defines the closed set of named operations a program may use.
//! This file contains no execution semantics; see `vm::ops` for those.
//! Operation names are part of the source language and never change.

use std::fmt;

/// Named operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,

    // Stack
    Dup,
    Drop,
    Swap,
    Over,

    // Coercion
    CastInt,
    CastStr,

    // Control flow
    If,
    Jmp,
    Exit,

    // Console
    Print,
    Println,
    Read,
    Stack,
}

impl Op {
    /// Every operation, in name-table order
    pub const ALL: [Op; 19] = [
        Op::Add,
        Op::Sub,
        Op::Mul,
        Op::Div,
        Op::Mod,
        Op::Eq,
        Op::Dup,
        Op::Drop,
        Op::Swap,
        Op::Over,
        Op::CastInt,
        Op::CastStr,
        Op::If,
        Op::Jmp,
        Op::Exit,
        Op::Print,
        Op::Println,
        Op::Read,
        Op::Stack,
    ];

    /// Look an operation up by its source name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "+" => Some(Op::Add),
            "-" => Some(Op::Sub),
            "*" => Some(Op::Mul),
            "/" => Some(Op::Div),
            "%" => Some(Op::Mod),

            "==" => Some(Op::Eq),

            "dup" => Some(Op::Dup),
            "drop" => Some(Op::Drop),
            "swap" => Some(Op::Swap),
            "over" => Some(Op::Over),

            "cast_int" => Some(Op::CastInt),
            "cast_str" => Some(Op::CastStr),

            "if" => Some(Op::If),
            "jmp" => Some(Op::Jmp),
            "exit" => Some(Op::Exit),

            "print" => Some(Op::Print),
            "println" => Some(Op::Println),
            "read" => Some(Op::Read),
            "stack" => Some(Op::Stack),

            _ => None,
        }
    }

    /// Source name of the operation
    pub fn name(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Eq => "==",
            Op::Dup => "dup",
            Op::Drop => "drop",
            Op::Swap => "swap",
            Op::Over => "over",
            Op::CastInt => "cast_int",
            Op::CastStr => "cast_str",
            Op::If => "if",
            Op::Jmp => "jmp",
            Op::Exit => "exit",
            Op::Print => "print",
            Op::Println => "println",
            Op::Read => "read",
            Op::Stack => "stack",
        }
    }

    /// Operations the constant folder may evaluate ahead of time
    pub fn is_foldable(self) -> bool {
        matches!(self, Op::Add | Op::Sub | Op::Mul | Op::Div)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for op in Op::ALL {
            assert_eq!(Op::from_name(op.name()), Some(op));
        }
        assert_eq!(Op::from_name("DUP"), None);
    }
}
