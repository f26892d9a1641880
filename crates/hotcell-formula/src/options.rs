//! Engine configuration

/// Default maximum expression nesting
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for parsing and evaluating formulas
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserOptions {
    /// Maximum expression nesting (default: 256). Deeper formulas fail with `#ERROR!`.
    pub max_depth: usize,
    /// Fall back to the built-in function library when neither the function
    /// hook nor a custom function handles a call (default: true)
    pub builtin_functions: bool,
    /// Ignore a single leading `=` (default: true)
    pub allow_leading_equals: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            builtin_functions: true,
            allow_leading_equals: true,
        }
    }
}

impl ParserOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_builtin_functions(mut self, enabled: bool) -> Self {
        self.builtin_functions = enabled;
        self
    }

    pub fn with_leading_equals(mut self, allowed: bool) -> Self {
        self.allow_leading_equals = allowed;
        self
    }
}
