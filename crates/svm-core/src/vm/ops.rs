//! Operation Semantics
//!
//! `apply` is the single dispatch point from an [`Op`] to its effect on a
//! machine. Binary operators pop both operands before they can fail, so a
//! failing `/` leaves neither operand behind.

use crate::console::Console;
use crate::error::{SvmError, SvmResult};
use crate::program::Op;

use super::stack::Stack;
use super::value::Value;
use super::vm::Machine;

/// Largest text `*` may build, in bytes
pub(crate) const MAX_TEXT_LEN: usize = 1 << 24;

/// Control outcome of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Apply `op` to the machine
pub fn apply<C: Console>(op: Op, vm: &mut Machine<C>) -> SvmResult<Flow> {
    match op {
        // Arithmetic
        Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Mod => {
            let b = vm.stack_mut().pop()?;
            let a = vm.stack_mut().pop()?;
            let result = arithmetic(op, a, b)?;
            vm.stack_mut().push(result);
        }

        Op::Eq => {
            let b = vm.stack_mut().pop()?;
            let a = vm.stack_mut().pop()?;
            vm.stack_mut().push(Value::Integer(i64::from(a == b)));
        }

        // Stack
        Op::Dup => vm.stack_mut().dup()?,
        Op::Drop => {
            vm.stack_mut().pop()?;
        }
        Op::Swap => {
            let stack = vm.stack_mut();
            let b = stack.pop()?;
            let a = stack.pop()?;
            stack.push(b);
            stack.push(a);
        }
        Op::Over => {
            let stack = vm.stack_mut();
            let b = stack.pop()?;
            let a = stack.pop()?;
            stack.push(a.clone());
            stack.push(b);
            stack.push(a);
        }

        // Coercion
        Op::CastInt => {
            let a = vm.stack_mut().pop()?;
            let n = a.to_integer()?;
            vm.stack_mut().push(Value::Integer(n));
        }
        Op::CastStr => {
            let a = vm.stack_mut().pop()?;
            vm.stack_mut().push(Value::Text(a.to_text()));
        }

        // Control flow
        Op::If => {
            let stack = vm.stack_mut();
            let false_clause = stack.pop()?;
            let true_clause = stack.pop()?;
            let test = stack.pop()?;
            stack.push(if test.is_truthy() { true_clause } else { false_clause });
        }
        Op::Jmp => {
            let addr = vm.stack_mut().pop()?;
            vm.jump(&addr)?;
        }
        Op::Exit => return Ok(Flow::Exit),

        // Console
        Op::Print => {
            let a = vm.stack_mut().pop()?;
            vm.console_mut().write_str(&a.to_text())?;
        }
        Op::Println => {
            let a = vm.stack_mut().pop()?;
            let mut line = a.to_text();
            line.push('\n');
            vm.console_mut().write_str(&line)?;
        }
        Op::Read => {
            let line = vm.console_mut().read_line()?;
            vm.stack_mut().push(Value::Text(line));
        }
        Op::Stack => {
            let listing = stack_listing(vm.stack());
            vm.console_mut().write_str(&listing)?;
        }
    }

    Ok(Flow::Continue)
}

/// Evaluate a binary arithmetic operator.
/// Operations outside `+ - * / %` are a type mismatch for any operands.
pub(crate) fn arithmetic(op: Op, a: Value, b: Value) -> SvmResult<Value> {
    let name = op.name();
    match (op, a, b) {
        (Op::Add, Value::Text(a), Value::Text(b)) => Ok(Value::Text(a + &b)),
        (Op::Mul, Value::Text(s), Value::Integer(n))
        | (Op::Mul, Value::Integer(n), Value::Text(s)) => repeat_text(&s, n).map(Value::Text),
        (Op::Add, Value::Integer(a), Value::Integer(b)) => checked(a.checked_add(b), name),
        (Op::Sub, Value::Integer(a), Value::Integer(b)) => checked(a.checked_sub(b), name),
        (Op::Mul, Value::Integer(a), Value::Integer(b)) => checked(a.checked_mul(b), name),
        (Op::Div, Value::Integer(a), Value::Integer(b)) => floor_div(a, b).map(Value::Integer),
        (Op::Mod, Value::Integer(a), Value::Integer(b)) => floor_mod(a, b).map(Value::Integer),
        (_, a, b) => Err(SvmError::TypeMismatch {
            op: name,
            left: a.type_name(),
            right: b.type_name(),
        }),
    }
}

fn checked(result: Option<i64>, name: &'static str) -> SvmResult<Value> {
    result
        .map(Value::Integer)
        .ok_or(SvmError::ArithmeticOverflow(name))
}

/// Repeat `s` `n` times; a negative count yields empty text
fn repeat_text(s: &str, n: i64) -> SvmResult<String> {
    let count = usize::try_from(n).unwrap_or(0);
    match s.len().checked_mul(count) {
        Some(len) if len <= MAX_TEXT_LEN => Ok(s.repeat(count)),
        _ => Err(SvmError::ArithmeticOverflow("*")),
    }
}

/// Division rounding toward negative infinity
fn floor_div(a: i64, b: i64) -> SvmResult<i64> {
    if b == 0 {
        return Err(SvmError::DivisionByZero);
    }
    let q = a.checked_div(b).ok_or(SvmError::ArithmeticOverflow("/"))?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Remainder carrying the sign of the divisor
fn floor_mod(a: i64, b: i64) -> SvmResult<i64> {
    if b == 0 {
        return Err(SvmError::DivisionByZero);
    }
    // MIN % -1 is 0, not an overflow
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

/// Diagnostic listing of a stack, top first, one entry per line
pub fn stack_listing(stack: &Stack) -> String {
    let mut out = String::from("Data stack (top first):\n");
    for value in stack.iter().rev() {
        out.push_str(&format!("- type {}, value '{}'\n", value.type_name(), value));
    }
    out
}
