pub mod ops;
pub mod stack;
pub mod value;
pub mod vm;

pub use ops::Flow;
pub use stack::Stack;
pub use value::Value;
pub use vm::{Completion, Machine};
