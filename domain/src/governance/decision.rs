//! The human sign-off record.

use crate::util::{current_timestamp_ms, fnv1a_hex, uuid_v4};
use serde::{Deserialize, Serialize};

/// What the human decided to do with a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    Approve,
    Reject,
    Modify,
    Experiment,
}

impl std::fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DecisionAction::Approve => "approve",
            DecisionAction::Reject => "reject",
            DecisionAction::Modify => "modify",
            DecisionAction::Experiment => "experiment",
        };
        write!(f, "{}", s)
    }
}

/// A signed human decision over one ADR.
///
/// Created once per sign-off event; append-only, never edited. The
/// `signature_hash` is a stable fingerprint of the decision fields, recorded
/// so auditors can detect post-hoc tampering of the stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanDecision {
    pub id: String,
    /// The ADR this decision finalizes
    pub adr_id: String,
    pub action: DecisionAction,
    /// Why the human decided this way
    pub rationale: String,
    /// Identity of the signer (or the auto-approve marker)
    pub signed_by: String,
    /// Fingerprint over the decision fields
    pub signature_hash: String,
    /// Milliseconds since epoch
    pub timestamp: u64,
}

impl HumanDecision {
    /// Create and fingerprint a new decision.
    pub fn sign(
        adr_id: impl Into<String>,
        action: DecisionAction,
        rationale: impl Into<String>,
        signed_by: impl Into<String>,
    ) -> Self {
        let adr_id = adr_id.into();
        let rationale = rationale.into();
        let signed_by = signed_by.into();
        let timestamp = current_timestamp_ms();

        let signature_hash = fnv1a_hex(&format!(
            "{}|{}|{}|{}|{}",
            adr_id, action, rationale, signed_by, timestamp
        ));

        Self {
            id: uuid_v4(),
            adr_id,
            action,
            rationale,
            signed_by,
            signature_hash,
            timestamp,
        }
    }

    /// Recompute the fingerprint and compare against the stored one.
    pub fn verify_signature(&self) -> bool {
        let expected = fnv1a_hex(&format!(
            "{}|{}|{}|{}|{}",
            self.adr_id, self.action, self.rationale, self.signed_by, self.timestamp
        ));
        expected == self.signature_hash
    }
}
