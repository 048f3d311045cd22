//! Sandbox limits.

use serde::Deserialize;

pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 4096;
pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_HEIGHT: usize = 256;

/// Resource limits applied before an expression is accepted.
///
/// All limits are checked at screening time. `max_depth` bounds how far the
/// parser recurses and `max_height` bounds the tree the evaluator walks, so
/// an accepted expression can always be evaluated without running out of
/// stack.
///
/// # Examples
///
/// ```
/// use cordon_lang::SandboxConfig;
///
/// let config = SandboxConfig::from_json_str(r#"{"max_depth": 16}"#).unwrap();
/// assert_eq!(config.max_depth, 16);
/// assert_eq!(config.max_expression_length, 4096);
/// assert_eq!(config.max_height, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    /// Longest accepted expression, in characters
    pub max_expression_length: usize,

    /// Deepest accepted nesting of parentheses, brackets, ternaries and
    /// prefix operators
    pub max_depth: usize,

    /// Tallest accepted expression tree. Every operator, member step and
    /// ternary adds a level, so `a.b.c` is three levels and a chain of
    /// 64 `&&` terms is 64.
    pub max_height: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        SandboxConfig {
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl SandboxConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
