//! Policy and sentinel inputs to the sign-off gate.

use serde::{Deserialize, Serialize};

/// Outcome of a policy check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of evaluating one policy against a proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyReport {
    pub policy_id: String,
    pub status: PolicyStatus,
    pub violations: Vec<String>,
}

impl PolicyReport {
    pub fn new(policy_id: impl Into<String>, status: PolicyStatus) -> Self {
        Self {
            policy_id: policy_id.into(),
            status,
            violations: Vec::new(),
        }
    }

    pub fn with_violation(mut self, violation: impl Into<String>) -> Self {
        self.violations.push(violation.into());
        self
    }
}

/// Severity of a sentinel alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// An anomaly raised by the sentinel monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentinelAlert {
    pub source: String,
    pub severity: Severity,
    pub message: String,
}

impl SentinelAlert {
    pub fn new(source: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            severity,
            message: message.into(),
        }
    }
}

/// A governance policy as stored in the knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Hard-block predicate for the sign-off gate.
///
/// Any failed policy report or critical sentinel alert blocks signing
/// outright; the human is never prompted. There is no in-process override.
pub fn signing_blocked(reports: &[PolicyReport], alerts: &[SentinelAlert]) -> bool {
    reports.iter().any(|r| r.status == PolicyStatus::Fail)
        || alerts.iter().any(|a| a.severity == Severity::Critical)
}
