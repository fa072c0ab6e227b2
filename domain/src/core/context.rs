//! Per-analysis accounting threaded explicitly through the call chain.

use serde::{Deserialize, Serialize};

/// Accumulated token usage and consultation depth for one analysis session.
///
/// Immutable value type: each registry round produces a new context via
/// [`add_tokens`](Self::add_tokens) / [`deeper`](Self::deeper) instead of
/// mutating shared state. Rounds are sequential, so no synchronization is
/// needed.
///
/// # Example
///
/// ```
/// use icgl_domain::AnalysisContext;
///
/// let ctx = AnalysisContext::new();
/// let ctx = ctx.add_tokens(1200).deeper();
/// assert_eq!(ctx.total_tokens, 1200);
/// assert_eq!(ctx.consultation_depth, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisContext {
    /// Cumulative LLM tokens consumed so far in this session
    pub total_tokens: u64,
    /// Number of nested consultation rounds already performed
    pub consultation_depth: u32,
}

impl AnalysisContext {
    /// Fresh context at depth zero with no usage
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a context with `tokens` added to the running total
    #[must_use]
    pub fn add_tokens(self, tokens: u64) -> Self {
        Self {
            total_tokens: self.total_tokens.saturating_add(tokens),
            ..self
        }
    }

    /// Return a context one consultation round deeper
    #[must_use]
    pub fn deeper(self) -> Self {
        Self {
            consultation_depth: self.consultation_depth.saturating_add(1),
            ..self
        }
    }
}
