//! Pre-execution program transforms.

pub mod fold;

pub use fold::{fold, fold_with_stats, FoldStats};
