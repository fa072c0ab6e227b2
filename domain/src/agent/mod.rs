//! Agent-facing domain types: roles, results, and response parsing.

pub mod parsing;
pub mod result;
pub mod role;

pub use parsing::{ParsedAgentResponse, parse_agent_response};
pub use result::{AgentId, AgentResult, FileAction, FileChange};
pub use role::AgentRole;
