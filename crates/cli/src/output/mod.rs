//! Output formatting for verification verdicts.

pub mod json;
pub mod text;

/// Output formatting options.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Max trailing characters of captured streams shown on failure
    /// (None = unlimited).
    pub tail: Option<usize>,
    /// Whether to include step durations.
    pub verbose: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            tail: Some(crate::tail::DEFAULT_TAIL),
            verbose: false,
        }
    }
}
