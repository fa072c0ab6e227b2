//! Application layer for ICGL
//!
//! Use cases (the agent registry fan-out and the human sign-off gate) and
//! the ports they depend on. Adapters for the ports live in the
//! infrastructure layer; LLM transport and persistence are external
//! collaborators behind [`ports::llm_gateway::LlmGateway`] and
//! [`ports::knowledge_store::KnowledgeStore`].

pub mod agents;
pub mod config;
pub mod ports;
pub mod use_cases;

pub use agents::{AgentReply, LlmAgent, RoleAgent, RoleProfile};
pub use config::AnalysisParams;
pub use ports::{
    intervention_log::{InterventionLog, NoInterventionLog},
    knowledge_store::{KnowledgeStore, StoreError},
    llm_gateway::{Completion, GatewayError, GenerateRequest, LlmGateway, TokenUsage},
    signoff::{AutoDeclineSignoff, ReviewResponse, SignoffError, SignoffPrompt},
};
pub use use_cases::{
    run_analysis::{AgentRegistry, RoundOutcome},
    sign_off::{AUTO_APPROVE_RATIONALE, AUTO_APPROVE_SIGNER, SignoffGate},
};
