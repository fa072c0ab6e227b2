//! Human sign-off port.
//!
//! The sign-off gate talks to a human through this port: present the
//! synthesis, collect an action and rationale, and separately confirm the
//! signature. Interactive adapters live in the host process; a
//! non-interactive built-in is provided for pipelines that must never sign.

use async_trait::async_trait;
use icgl_domain::{AdrRecord, DecisionAction, SynthesizedResult};
use thiserror::Error;

/// Errors during the sign-off interaction itself.
///
/// These represent failures of the interaction channel, not decisions: a
/// reviewer declining to act is expressed as `Ok(None)` / `Ok(false)`.
#[derive(Error, Debug)]
pub enum SignoffError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The reviewer's choice before signing
#[derive(Debug, Clone)]
pub struct ReviewResponse {
    pub action: DecisionAction,
    pub rationale: String,
    pub signed_by: String,
}

/// Port for collecting a human decision over a synthesized analysis.
#[async_trait]
pub trait SignoffPrompt: Send + Sync {
    /// Present the ADR and synthesis; collect the reviewer's response.
    ///
    /// `Ok(None)` means the reviewer walked away without deciding — the gate
    /// produces no decision and the caller may retry later.
    async fn review(
        &self,
        adr: &AdrRecord,
        synthesis: &SynthesizedResult,
    ) -> Result<Option<ReviewResponse>, SignoffError>;

    /// Final confirmation step before the decision record is created.
    ///
    /// Returning `false` aborts signing; no decision is produced.
    async fn confirm_signature(&self, response: &ReviewResponse) -> Result<bool, SignoffError>;
}

/// Built-in prompt that never produces a decision.
///
/// Useful for unattended pipelines where signing must happen elsewhere: the
/// gate always returns "no decision" and downstream side effects stay locked.
pub struct AutoDeclineSignoff;

#[async_trait]
impl SignoffPrompt for AutoDeclineSignoff {
    async fn review(
        &self,
        _adr: &AdrRecord,
        _synthesis: &SynthesizedResult,
    ) -> Result<Option<ReviewResponse>, SignoffError> {
        Ok(None)
    }

    async fn confirm_signature(&self, _response: &ReviewResponse) -> Result<bool, SignoffError> {
        Ok(false)
    }
}
