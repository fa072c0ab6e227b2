//! The ADR: the governance record for one proposed decision.

use super::decision::{DecisionAction, HumanDecision};
use crate::core::error::DomainError;
use crate::util::{current_timestamp_ms, uuid_v4};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an ADR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdrStatus {
    /// Created on proposal submission
    Draft,
    /// Under review
    Proposed,
    /// Signed terminal states
    Accepted,
    Rejected,
    Conditional,
    Experimental,
}

impl AdrStatus {
    /// Whether this status can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AdrStatus::Accepted
                | AdrStatus::Rejected
                | AdrStatus::Conditional
                | AdrStatus::Experimental
        )
    }
}

/// The governance record representing one proposed decision.
///
/// Lifecycle: created `Draft` → moved to a terminal status only by
/// [`apply_decision`](Self::apply_decision) with a recorded
/// [`HumanDecision`]. Once signed, the record refuses further transitions —
/// the signature is the commit point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdrRecord {
    pub id: String,
    pub title: String,
    pub status: AdrStatus,
    /// Problem context the decision addresses
    pub context: String,
    /// The decision text itself
    pub decision: String,
    pub consequences: Vec<String>,
    /// Policies consulted during analysis
    pub related_policies: Vec<String>,
    /// Sentinel signals present at decision time
    pub sentinel_signals: Vec<String>,
    /// Set when a human decision finalizes this record
    pub human_decision_id: Option<String>,
    /// Milliseconds since epoch
    pub created_at: u64,
}

impl AdrRecord {
    /// Create a new draft record
    pub fn new(title: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            id: uuid_v4(),
            title: title.into(),
            status: AdrStatus::Draft,
            context: context.into(),
            decision: String::new(),
            consequences: Vec::new(),
            related_policies: Vec::new(),
            sentinel_signals: Vec::new(),
            human_decision_id: None,
            created_at: current_timestamp_ms(),
        }
    }

    pub fn with_decision(mut self, decision: impl Into<String>) -> Self {
        self.decision = decision.into();
        self
    }

    pub fn with_consequence(mut self, consequence: impl Into<String>) -> Self {
        self.consequences.push(consequence.into());
        self
    }

    pub fn with_related_policy(mut self, policy_id: impl Into<String>) -> Self {
        self.related_policies.push(policy_id.into());
        self
    }

    pub fn with_sentinel_signal(mut self, signal: impl Into<String>) -> Self {
        self.sentinel_signals.push(signal.into());
        self
    }

    /// Mark the record as under review
    pub fn propose(&mut self) {
        if self.status == AdrStatus::Draft {
            self.status = AdrStatus::Proposed;
        }
    }

    /// Whether a human decision has finalized this record
    pub fn is_signed(&self) -> bool {
        self.human_decision_id.is_some()
    }

    /// Apply a recorded human decision, moving the record to its terminal
    /// status. Rejects a second decision and decisions for other ADRs.
    pub fn apply_decision(&mut self, decision: &HumanDecision) -> Result<(), DomainError> {
        if self.is_signed() || self.status.is_terminal() {
            return Err(DomainError::AlreadySigned(self.id.clone()));
        }
        if decision.adr_id != self.id {
            return Err(DomainError::DecisionMismatch {
                decision_id: decision.id.clone(),
                expected: decision.adr_id.clone(),
                actual: self.id.clone(),
            });
        }

        self.status = match decision.action {
            DecisionAction::Approve => AdrStatus::Accepted,
            DecisionAction::Reject => AdrStatus::Rejected,
            DecisionAction::Modify => AdrStatus::Conditional,
            DecisionAction::Experiment => AdrStatus::Experimental,
        };
        self.human_decision_id = Some(decision.id.clone());
        Ok(())
    }
}
