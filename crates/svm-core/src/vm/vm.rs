//! Stack Machine Core
//!
//! Defines the machine structure and its fetch/dispatch loop.
//! Operation semantics live in `ops`.

use tracing::{debug, trace};

use crate::config::SvmConfig;
use crate::console::Console;
use crate::error::{SvmError, SvmResult};
use crate::program::{Element, Program};

use super::ops::{self, Flow};
use super::stack::Stack;
use super::value::Value;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The instruction pointer ran off the end of the program
    Finished,

    /// The program executed `exit`
    Exited,
}

/// Stack machine
#[derive(Debug)]
pub struct Machine<C> {
    program: Program,
    stack: Stack,
    ip: usize,

    console: C,

    steps: u64,
    step_limit: Option<u64>,
}

impl<C: Console> Machine<C> {
    /// Create a machine with default configuration
    pub fn new(program: Program, console: C) -> Self {
        Self::with_config(&SvmConfig::default(), program, console)
    }

    pub fn with_config(config: &SvmConfig, program: Program, console: C) -> Self {
        Machine {
            program,
            stack: Stack::new(),
            ip: 0,
            console,
            steps: 0,
            step_limit: config.step_limit,
        }
    }

    /// Execute until the program halts or an operation fails
    pub fn run(&mut self) -> SvmResult<Completion> {
        debug!(len = self.program.len(), ip = self.ip, "run started");

        while !self.is_halted() {
            if self.step()? == Flow::Exit {
                debug!(ip = self.ip, depth = self.stack.len(), "program exited");
                return Ok(Completion::Exited);
            }
        }

        debug!(steps = self.steps, depth = self.stack.len(), "run finished");
        Ok(Completion::Finished)
    }

    /// Execute a single element. A halted machine does nothing.
    pub fn step(&mut self) -> SvmResult<Flow> {
        if self.is_halted() {
            return Ok(Flow::Continue);
        }

        self.steps += 1;
        if let Some(limit) = self.step_limit {
            if self.steps > limit {
                return Err(SvmError::StepLimitExceeded(limit));
            }
        }

        // Arc handle; the element stays borrowed across `apply`
        let program = self.program.clone();
        let element = &program[self.ip];
        self.ip += 1;

        trace!(ip = self.ip - 1, element = %element, depth = self.stack.len(), "step");

        let flow = match element {
            Element::Literal(value) => {
                self.stack.push(value.clone());
                Flow::Continue
            }
            Element::Op(op) => ops::apply(*op, self)?,
            Element::Word(word) => return Err(SvmError::UnknownOpcode(word.clone())),
        };

        if flow == Flow::Exit {
            self.halt();
        }
        Ok(flow)
    }

    /// Set the instruction pointer from a popped address
    pub(crate) fn jump(&mut self, addr: &Value) -> SvmResult<()> {
        match addr.as_integer() {
            Some(n) if n >= 0 && (n as u64) < self.program.len() as u64 => {
                self.ip = n as usize;
                Ok(())
            }
            _ => Err(SvmError::InvalidJumpTarget(format!(
                "{} '{}' (program has {} elements)",
                addr.type_name(),
                addr,
                self.program.len()
            ))),
        }
    }

    fn halt(&mut self) {
        self.ip = self.program.len();
    }

    pub fn is_halted(&self) -> bool {
        self.ip >= self.program.len()
    }

    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    /// Number of elements executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Discard the machine, keeping its final stack and console
    pub fn into_parts(self) -> (Stack, C) {
        (self.stack, self.console)
    }
}
