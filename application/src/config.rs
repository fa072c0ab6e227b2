//! Analysis parameters — fan-out loop control.
//!
//! [`AnalysisParams`] groups the static limits that bound one governance
//! analysis: recursion depth, per-agent timeout, token budget, and the
//! auto-approve escape hatch.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied by the registry and the sign-off gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Maximum nested consultation rounds before synthesis short-circuits.
    pub max_consultation_depth: u32,
    /// Per-agent LLM call timeout; `None` disables the timeout.
    pub agent_timeout: Option<Duration>,
    /// Token ceiling for one analysis session.
    pub token_budget: u64,
    /// Skip human review and synthesize an approval. Audit-visible.
    pub auto_approve: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            max_consultation_depth: 3,
            agent_timeout: Some(Duration::from_secs(120)),
            token_budget: 100_000,
            auto_approve: false,
        }
    }
}

impl AnalysisParams {
    // ==================== Builder Methods ====================

    pub fn with_max_consultation_depth(mut self, depth: u32) -> Self {
        self.max_consultation_depth = depth;
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.agent_timeout = timeout;
        self
    }

    pub fn with_token_budget(mut self, budget: u64) -> Self {
        self.token_budget = budget;
        self
    }

    pub fn with_auto_approve(mut self, auto_approve: bool) -> Self {
        self.auto_approve = auto_approve;
        self
    }
}
