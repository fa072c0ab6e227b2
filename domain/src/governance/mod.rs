//! Governance records: ADRs, human decisions, policy/sentinel inputs,
//! the deferred signing queue and the intervention feedback hook.

pub mod adr;
pub mod decision;
pub mod intervention;
pub mod policy;
pub mod queue;

pub use adr::{AdrRecord, AdrStatus};
pub use decision::{DecisionAction, HumanDecision};
pub use intervention::{InterventionEvent, detect_intervention};
pub use policy::{Policy, PolicyReport, PolicyStatus, SentinelAlert, Severity, signing_blocked};
pub use queue::{QueueItemStatus, RiskLevel, SigningQueue, SigningQueueItem};
