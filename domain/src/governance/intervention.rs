//! The intervention feedback hook.
//!
//! When the council recommended approval but the human decided otherwise,
//! the delta is recorded so later prompts can be biased away from repeating
//! rejected suggestions. This is the system's only explicit feedback loop.

use super::decision::{DecisionAction, HumanDecision};
use crate::synthesis::result::SynthesizedResult;
use crate::util::current_timestamp_ms;
use serde::{Deserialize, Serialize};

/// Recorded delta between the system's recommendation and the human decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionEvent {
    pub adr_id: String,
    /// The top consensus recommendation the council produced
    pub system_recommendation: String,
    /// What the human decided instead
    pub human_action: DecisionAction,
    pub rationale: String,
    /// Milliseconds since epoch
    pub timestamp: u64,
}

/// Detect a human intervention against the council's recommendation.
///
/// Fires when the decision is anything other than an unconditional approve
/// while the synthesis's top consensus recommendation begins with "APPROVE"
/// (case-insensitive).
pub fn detect_intervention(
    synthesis: &SynthesizedResult,
    decision: &HumanDecision,
) -> Option<InterventionEvent> {
    if decision.action == DecisionAction::Approve {
        return None;
    }

    let top = synthesis.top_recommendation()?;
    if !top.trim().to_uppercase().starts_with("APPROVE") {
        return None;
    }

    Some(InterventionEvent {
        adr_id: decision.adr_id.clone(),
        system_recommendation: top.to_string(),
        human_action: decision.action,
        rationale: decision.rationale.clone(),
        timestamp: current_timestamp_ms(),
    })
}
