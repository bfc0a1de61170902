//! Program Loader
//!
//! Turns source text into a runnable program: tokenize, classify, and
//! optionally constant-fold according to the configuration.

use tracing::debug;

use crate::config::SvmConfig;
use crate::error::SvmResult;
use crate::optimize::fold_with_stats;
use crate::program::Program;

/// Source loader
pub struct ProgramLoader;

impl ProgramLoader {
    /// Load a program from source text
    pub fn load(source: &str, config: &SvmConfig) -> SvmResult<Program> {
        let program = Program::parse(source)?;
        if !config.fold_constants {
            return Ok(program);
        }

        let (folded, stats) = fold_with_stats(&program);
        debug!(
            before = program.len(),
            after = folded.len(),
            folds = stats.folds,
            "program loaded"
        );
        Ok(folded)
    }
}
