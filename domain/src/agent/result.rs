//! The immutable output of one agent invocation.

use super::role::AgentRole;
use crate::util::uuid_v4;
use serde::{Deserialize, Serialize};

/// Unique identifier for a registered agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an AgentId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new unique AgentId.
    pub fn generate() -> Self {
        Self(uuid_v4())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for AgentId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of file modification an agent proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Create,
    Modify,
    Delete,
}

/// A proposed file change.
///
/// Changes are proposals only; nothing is written until a signed decision
/// unlocks execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChange {
    /// Path relative to the repository root
    pub path: String,
    /// What kind of change is proposed
    pub action: FileAction,
    /// One-line description of the change
    pub summary: String,
    /// Full proposed content, when the agent produced one
    pub content: Option<String>,
}

impl FileChange {
    pub fn new(path: impl Into<String>, action: FileAction, summary: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            action,
            summary: summary.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// The opinion one agent produced for one problem.
///
/// Produced exactly once per invocation and never mutated afterwards.
/// Confidence is clamped to `[0, 1]` on construction, so the synthesis math
/// can rely on the range.
///
/// # Example
///
/// ```
/// use icgl_domain::{AgentResult, AgentRole};
///
/// let result = AgentResult::new("arch-1", AgentRole::Architect, "Looks sound", 1.4)
///     .with_recommendation("Add Redis");
/// assert_eq!(result.confidence, 1.0); // clamped
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    /// Which agent produced this result
    pub agent_id: AgentId,
    /// The agent's role
    pub role: AgentRole,
    /// Free-text analysis
    pub analysis: String,
    /// Recommended actions
    pub recommendations: Vec<String>,
    /// Raised concerns
    pub concerns: Vec<String>,
    /// Self-reported confidence in [0, 1]
    pub confidence: f64,
    /// Cited policies, ADRs, or documents
    pub references: Vec<String>,
    /// Proposed file changes
    pub file_changes: Vec<FileChange>,
}

impl AgentResult {
    /// Create a new result with the confidence clamped into [0, 1].
    pub fn new(
        agent_id: impl Into<AgentId>,
        role: AgentRole,
        analysis: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            role,
            analysis: analysis.into(),
            recommendations: Vec::new(),
            concerns: Vec::new(),
            confidence: confidence.clamp(0.0, 1.0),
            references: Vec::new(),
            file_changes: Vec::new(),
        }
    }

    /// Degraded result for an agent whose invocation failed.
    ///
    /// Fail-soft contract: the failure is surfaced as a zero-confidence
    /// opinion so that downstream counts of "N of M agents responded" stay
    /// truthful, and one agent's failure never aborts its siblings.
    pub fn degraded(agent_id: impl Into<AgentId>, role: AgentRole, reason: &str) -> Self {
        Self {
            agent_id: agent_id.into(),
            role,
            analysis: format!("Agent execution failed: {}", reason),
            recommendations: Vec::new(),
            concerns: vec!["Execution Error".to_string()],
            confidence: 0.0,
            references: Vec::new(),
            file_changes: Vec::new(),
        }
    }

    pub fn with_recommendation(mut self, rec: impl Into<String>) -> Self {
        self.recommendations.push(rec.into());
        self
    }

    pub fn with_concern(mut self, concern: impl Into<String>) -> Self {
        self.concerns.push(concern.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    pub fn with_file_change(mut self, change: FileChange) -> Self {
        self.file_changes.push(change);
        self
    }

    /// Whether this is a degraded (failed) result
    pub fn is_degraded(&self) -> bool {
        self.confidence == 0.0 && self.concerns.iter().any(|c| c == "Execution Error")
    }
}
