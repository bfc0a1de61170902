//! Program Representation
//!
//! An immutable, shareable sequence of elements.

pub mod element;
pub mod op;

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use crate::error::SvmResult;
use crate::lexer::{self, Token};

pub use element::Element;
pub use op::Op;

/// Loaded program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    elements: Arc<[Element]>,
}

impl Program {
    pub fn new(elements: Vec<Element>) -> Self {
        Program {
            elements: elements.into(),
        }
    }

    /// Classify each token into an element
    pub fn from_tokens<'a, I>(tokens: I) -> SvmResult<Self>
    where
        I: IntoIterator<Item = &'a Token>,
    {
        let elements = tokens
            .into_iter()
            .map(|token| Element::parse(&token.text))
            .collect::<SvmResult<Vec<_>>>()?;
        Ok(Program::new(elements))
    }

    /// Tokenize and load source text
    pub fn parse(source: &str) -> SvmResult<Self> {
        let tokens = lexer::tokenize(source)?;
        Program::from_tokens(&tokens)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// True if any element is the `jmp` operation
    pub fn contains_jump(&self) -> bool {
        self.elements.iter().any(|e| e.as_op() == Some(Op::Jmp))
    }
}

impl Index<usize> for Program {
    type Output = Element;

    fn index(&self, index: usize) -> &Element {
        &self.elements[index]
    }
}

impl Default for Program {
    fn default() -> Self {
        Program::new(Vec::new())
    }
}

impl From<Vec<Element>> for Program {
    fn from(elements: Vec<Element>) -> Self {
        Program::new(elements)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}
