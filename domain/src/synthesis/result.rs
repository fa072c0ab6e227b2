//! The merged consensus view over a set of agent results.

use crate::agent::result::{AgentResult, FileChange};
use serde::{Deserialize, Serialize};

/// The mediator's tie-breaking opinion, attached when escalation fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mediation {
    /// The mediator's analysis of the conflicting results
    pub analysis: String,
    /// The mediator's confidence in [0, 1]
    pub confidence: f64,
    /// The mediator's recommendations
    pub recommendations: Vec<String>,
}

/// The consensus view synthesized from all individual agent results.
///
/// Derived data: every field is recomputed from `individual_results` by
/// [`synthesize`](crate::synthesis::consensus::synthesize) and never mutated
/// independently. The one exception is `mediation`, attached exactly once by
/// the registry when escalation triggers.
///
/// Callers must not assume any ordering of `individual_results`; fan-out
/// completion order is unspecified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedResult {
    /// Every agent's result, including degraded ones
    pub individual_results: Vec<AgentResult>,
    /// Recommendations stated by enough agents to count as consensus
    pub consensus_recommendations: Vec<String>,
    /// Union of all concerns, deduplicated
    pub all_concerns: Vec<String>,
    /// Arithmetic mean of individual confidences
    pub overall_confidence: f64,
    /// Mediator verdict, present only after escalation
    pub mediation: Option<Mediation>,
    /// All proposed file changes, concatenated in agent order
    pub file_changes: Vec<FileChange>,
}

impl SynthesizedResult {
    /// Zero-confidence synthesis over no results.
    pub fn empty() -> Self {
        Self {
            individual_results: Vec::new(),
            consensus_recommendations: Vec::new(),
            all_concerns: Vec::new(),
            overall_confidence: 0.0,
            mediation: None,
            file_changes: Vec::new(),
        }
    }

    /// Number of agents that produced a non-degraded result
    pub fn responsive_agents(&self) -> usize {
        self.individual_results.iter().filter(|r| !r.is_degraded()).count()
    }

    /// The highest-ranked consensus recommendation, if any
    pub fn top_recommendation(&self) -> Option<&str> {
        self.consensus_recommendations.first().map(String::as_str)
    }
}
