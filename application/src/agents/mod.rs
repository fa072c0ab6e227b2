//! The role agents: one LLM-backed persona per governance role.

pub mod llm_agent;
pub mod profile;

pub use llm_agent::{AgentReply, LlmAgent, RoleAgent};
pub use profile::RoleProfile;
