//! SVM - Stack Machine Core Library
//!
//! Public API surface for the stack machine: values and the operand stack,
//! the program model, the dispatch loop, and the constant folder.

pub mod config;
pub mod console;
pub mod error;
pub mod lexer;
pub mod loader;
pub mod optimize;
pub mod program;
pub mod vm;


// Re-export commonly used types
pub use config::SvmConfig;
pub use console::{BufferConsole, Console, NullConsole, StdConsole};
pub use error::{SvmError, SvmResult};
pub use loader::ProgramLoader;
pub use optimize::{fold, fold_with_stats, FoldStats};
pub use program::{Element, Op, Program};
pub use vm::{Completion, Machine, Stack, Value};

#[cfg(test)]
mod tests {
    use super::*;

    fn program(elements: Vec<Element>) -> Program {
        Program::new(elements)
    }

    fn run(program: Program) -> (SvmResult<Completion>, Vec<Value>, String) {
        let mut vm = Machine::new(program, BufferConsole::new());
        let result = vm.run();
        let (stack, console) = vm.into_parts();
        (result, stack.into_vec(), console.output().to_string())
    }

    #[test]
    fn add_then_multiply_prints_twenty() {
        let (result, stack, out) = run(program(vec![
            Element::integer(2),
            Element::integer(3),
            Op::Add.into(),
            Element::integer(4),
            Op::Mul.into(),
            Op::Println.into(),
        ]));
        assert_eq!(result, Ok(Completion::Finished));
        assert!(stack.is_empty());
        assert_eq!(out, "20\n");
    }

    #[test]
    fn dup_square_prints_twenty_five() {
        let (_, _, out) = run(program(vec![
            Element::integer(5),
            Op::Dup.into(),
            Op::Mul.into(),
            Op::Println.into(),
        ]));
        assert_eq!(out, "25\n");
    }

    #[test]
    fn division_by_zero_after_both_pops() {
        let mut vm = Machine::new(
            program(vec![Element::integer(10), Element::integer(0), Op::Div.into()]),
            BufferConsole::new(),
        );
        vm.step().expect("push failed");
        vm.step().expect("push failed");
        assert_eq!(
            vm.stack().as_slice(),
            &[Value::Integer(10), Value::Integer(0)]
        );
        assert_eq!(vm.run(), Err(SvmError::DivisionByZero));
        assert!(vm.stack().is_empty());
    }

    #[test]
    fn fold_then_run_matches_plain_run() {
        let source = program(vec![Element::integer(2), Element::integer(3), Op::Add.into(), Element::integer(5), Op::Mul.into()]);
        let folded = fold(&source);
        assert_eq!(folded.elements(), &[Element::integer(25)]);

        let (_, plain, _) = run(source);
        let (_, optimized, _) = run(folded);
        assert_eq!(plain, optimized);
    }

    #[test]
    fn text_literal_prints_without_quotes() {
        let source = Program::parse("\"hello, world\" println").expect("parse failed");
        let (_, _, out) = run(source);
        assert_eq!(out, "hello, world\n");
    }

    #[test]
    fn countdown_loop_with_jump() {
        // Loop body starts at 1; once the counter reaches 0, jump past the padding to 14
        let source = Program::parse(
            "3 dup println 1 - dup 0 == 14 1 if jmp \"unused\" \"unused\" drop",
        )
        .expect("parse failed");
        assert_eq!(source.len(), 15);
        let (result, stack, out) = run(source);
        assert_eq!(result, Ok(Completion::Finished));
        assert_eq!(out, "3\n2\n1\n");
        assert!(stack.is_empty());
    }
}
