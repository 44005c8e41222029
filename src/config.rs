/// Default bound on nested quotation execution.
pub const DEFAULT_MAX_DEPTH: usize = 100_000;

/// Settings for one evaluator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How many quotation executions may be active at once before the run
    /// fails with `RecursionLimit`. Counts `!`, `?` and both halves of `#`.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}
