//! Constant folding.
//!
//! Collapses `literal literal op` windows where both literals are integers
//! and `op` is one of `+ - * /`. The result is computed by running the
//! window on a throwaway machine, so folding can never disagree with the
//! interpreter's own arithmetic.
//!
//! Programs containing `jmp` are returned unchanged: a jump target is an
//! absolute index that may be computed at run time, and shrinking the
//! program would silently move it.

use tracing::debug;

use crate::console::NullConsole;
use crate::program::{Element, Program};
use crate::vm::value::Value;
use crate::vm::vm::Machine;

/// Counters from a folding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldStats {
    /// Number of windows replaced
    pub folds: usize,
}

/// Fold constants until no window applies
pub fn fold(program: &Program) -> Program {
    fold_with_stats(program).0
}

pub fn fold_with_stats(program: &Program) -> (Program, FoldStats) {
    let mut stats = FoldStats::default();

    if program.contains_jump() {
        debug!(len = program.len(), "program contains jmp, folding skipped");
        return (program.clone(), stats);
    }

    let mut elements = program.elements().to_vec();
    while fold_step(&mut elements) {
        stats.folds += 1;
    }

    if stats.folds == 0 {
        return (program.clone(), stats);
    }
    (Program::new(elements), stats)
}

/// Replace the first foldable window with its value.
/// Returns `false` when nothing was folded.
fn fold_step(elements: &mut Vec<Element>) -> bool {
    let Some((start, value)) = next_fold(elements) else {
        return false;
    };
    debug!(
        "constant-folded {} {} {} to {}",
        elements[start],
        elements[start + 1],
        elements[start + 2],
        value
    );
    elements.splice(start..start + 3, [Element::integer(value)]);
    true
}

/// First foldable window and its value. Windows that fail to evaluate
/// are skipped so the error still happens at run time.
fn next_fold(elements: &[Element]) -> Option<(usize, i64)> {
    elements
        .windows(3)
        .enumerate()
        .filter(|(_, window)| is_candidate(window))
        .find_map(|(start, window)| evaluate(window).map(|value| (start, value)))
}

fn is_candidate(window: &[Element]) -> bool {
    window[0].as_integer().is_some()
        && window[1].as_integer().is_some()
        && window[2].as_op().is_some_and(|op| op.is_foldable())
}

fn evaluate(window: &[Element]) -> Option<i64> {
    let mut vm = Machine::new(Program::new(window.to_vec()), NullConsole);
    if let Err(err) = vm.run() {
        debug!(%err, "window left unfolded");
        return None;
    }
    let (stack, _) = vm.into_parts();
    match stack.as_slice() {
        [Value::Integer(n)] => Some(*n),
        _ => None,
    }
}
