//! The analysis input: a free-text proposal routed to the agent council.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A problem statement submitted for multi-agent analysis.
///
/// Immutable once constructed. `metadata` carries caller-supplied annotations
/// (ticket links, requester, etc.); token accounting and consultation depth
/// live in [`AnalysisContext`](crate::core::context::AnalysisContext), not
/// here.
///
/// # Example
///
/// ```
/// use icgl_domain::Problem;
///
/// let problem = Problem::new("Add caching layer", "API latency is too high under load")
///     .with_related_file("src/api/handlers.rs");
/// assert_eq!(problem.related_files.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    /// Short title of the proposal
    pub title: String,
    /// Free-text context describing the problem
    pub context: String,
    /// Files the proposal touches or references
    pub related_files: Vec<String>,
    /// Caller-supplied annotations
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Problem {
    /// Create a new problem statement
    pub fn new(title: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            context: context.into(),
            related_files: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add a related file path
    pub fn with_related_file(mut self, path: impl Into<String>) -> Self {
        self.related_files.push(path.into());
        self
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
