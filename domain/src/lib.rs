//! Domain layer for ICGL
//!
//! This crate contains the core governance entities and the deterministic
//! consensus logic. It has no dependencies on infrastructure or transport
//! concerns.
//!
//! # Core Concepts
//!
//! ## Analysis
//!
//! A [`Problem`] is fanned out to a council of role agents (architect,
//! policy, sentinel, ...). Each produces one [`AgentResult`]; the set is
//! merged by [`synthesize`] into a single [`SynthesizedResult`] carrying
//! consensus recommendations and an overall confidence.
//!
//! ## Governance
//!
//! A [`SynthesizedResult`] feeds an [`AdrRecord`] (the governance record for
//! one proposed decision). Only a recorded [`HumanDecision`] may move an ADR
//! to a terminal status; the decision is the commit point for any
//! side-effecting action.

pub mod agent;
pub mod budget;
pub mod core;
pub mod governance;
pub mod synthesis;
pub mod util;

// Re-export commonly used types
pub use agent::{
    parsing::{ParsedAgentResponse, parse_agent_response},
    result::{AgentId, AgentResult, FileAction, FileChange},
    role::AgentRole,
};
pub use budget::{BudgetState, BudgetStatus, BudgetTracker};
pub use core::{
    context::AnalysisContext,
    error::DomainError,
    problem::Problem,
};
pub use governance::{
    adr::{AdrRecord, AdrStatus},
    decision::{DecisionAction, HumanDecision},
    intervention::{InterventionEvent, detect_intervention},
    policy::{Policy, PolicyReport, PolicyStatus, SentinelAlert, Severity, signing_blocked},
    queue::{QueueItemStatus, RiskLevel, SigningQueue, SigningQueueItem},
};
pub use synthesis::{
    consensus::{
        CONSENSUS_AGREEMENT_COUNT, MEDIATION_CONCERN_LIMIT, MEDIATION_CONFIDENCE_FLOOR,
        needs_mediation, synthesize,
    },
    result::{Mediation, SynthesizedResult},
};
