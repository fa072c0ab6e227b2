//! The human sign-off gate (HDAL).
//!
//! The only component that may move an ADR to a terminal status. The gate
//! runs a fixed sequence: hard policy/sentinel block, optional auto-approve
//! escape hatch, human review, signature confirmation. Every exit other
//! than a confirmed signature produces no decision — and no decision means
//! no side effects downstream.

use crate::ports::intervention_log::{InterventionLog, NoInterventionLog};
use crate::ports::signoff::{SignoffError, SignoffPrompt};
use icgl_domain::{
    AdrRecord, DecisionAction, HumanDecision, PolicyReport, SentinelAlert, SynthesizedResult,
    detect_intervention, signing_blocked,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Rationale recorded on auto-approved decisions.
///
/// Fixed string so auditors can always tell an auto-approval apart from a
/// real human signature.
pub const AUTO_APPROVE_RATIONALE: &str = "Auto-approved by configuration (no human review)";

/// Signer identity recorded on auto-approved decisions.
pub const AUTO_APPROVE_SIGNER: &str = "auto-approve";

/// The sign-off gate over a single ADR.
pub struct SignoffGate {
    prompt: Arc<dyn SignoffPrompt>,
    intervention_log: Arc<dyn InterventionLog>,
    auto_approve: bool,
}

impl SignoffGate {
    /// Create a gate with no intervention sink; events are discarded until
    /// [`with_intervention_log`](Self::with_intervention_log) attaches one.
    pub fn new(prompt: Arc<dyn SignoffPrompt>) -> Self {
        Self {
            prompt,
            intervention_log: Arc::new(NoInterventionLog),
            auto_approve: false,
        }
    }

    /// Attach a sink for human-intervention events.
    pub fn with_intervention_log(mut self, intervention_log: Arc<dyn InterventionLog>) -> Self {
        self.intervention_log = intervention_log;
        self
    }

    /// Enable the auto-approve escape hatch for unattended execution.
    pub fn with_auto_approve(mut self, auto_approve: bool) -> Self {
        self.auto_approve = auto_approve;
        self
    }

    /// Review a synthesis and, if permitted, produce a signed decision.
    ///
    /// Returns `Ok(None)` in three distinct but same-shaped cases: a hard
    /// policy/sentinel block, a reviewer who walked away, and a reviewer who
    /// declined the signature step. Callers must treat `None` as "no action
    /// permitted" — never as an implicit approval or a retry trigger.
    pub async fn review_and_sign(
        &self,
        adr: &mut AdrRecord,
        synthesis: &SynthesizedResult,
        policy_reports: &[PolicyReport],
        alerts: &[SentinelAlert],
    ) -> Result<Option<HumanDecision>, SignoffError> {
        // Hard gate: the human is never prompted past a critical violation.
        if signing_blocked(policy_reports, alerts) {
            info!("Signing blocked for ADR {} by policy/sentinel state", adr.id);
            return Ok(None);
        }

        if self.auto_approve {
            info!("Auto-approving ADR {}", adr.id);
            let decision = HumanDecision::sign(
                adr.id.clone(),
                DecisionAction::Approve,
                AUTO_APPROVE_RATIONALE,
                AUTO_APPROVE_SIGNER,
            );
            self.finalize(adr, synthesis, decision).map(Some)
        } else {
            let Some(response) = self.prompt.review(adr, synthesis).await? else {
                info!("Reviewer produced no decision for ADR {}", adr.id);
                return Ok(None);
            };

            if !self.prompt.confirm_signature(&response).await? {
                info!("Signature declined for ADR {}", adr.id);
                return Ok(None);
            }

            let decision = HumanDecision::sign(
                adr.id.clone(),
                response.action,
                response.rationale,
                response.signed_by,
            );
            self.finalize(adr, synthesis, decision).map(Some)
        }
    }

    fn finalize(
        &self,
        adr: &mut AdrRecord,
        synthesis: &SynthesizedResult,
        decision: HumanDecision,
    ) -> Result<HumanDecision, SignoffError> {
        adr.apply_decision(&decision)
            .map_err(|e| SignoffError::InvalidInput(e.to_string()))?;

        if let Some(event) = detect_intervention(synthesis, &decision) {
            info!(
                "Human intervention on ADR {}: system said {:?}, human chose {}",
                adr.id, event.system_recommendation, decision.action
            );
            self.intervention_log.record(&event);
        }

        if !decision.verify_signature() {
            // Fingerprint mismatch right after signing indicates a bug, not
            // a user error; surface it loudly but do not roll back the ADR.
            warn!("Signature fingerprint mismatch for decision {}", decision.id);
        }

        Ok(decision)
    }
}
