//! SVM Configuration
//!
//! Knobs for loading and running programs.
//! Configuration specifies behavior only; enforcement is handled by the machine and the folder.

/// Machine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvmConfig {
    /// Run the constant folder before execution
    pub fold_constants: bool,

    /// Maximum number of steps a single run may take (`None` = unlimited)
    pub step_limit: Option<u64>,
}

impl Default for SvmConfig {
    fn default() -> Self {
        SvmConfig {
            fold_constants: true,
            step_limit: None,
        }
    }
}

impl SvmConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step limit
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Enable or disable constant folding
    pub fn with_folding(mut self, enabled: bool) -> Self {
        self.fold_constants = enabled;
        self
    }
}
