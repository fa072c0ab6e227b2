//! Role profiles: the per-persona prompt templates and call parameters.
//!
//! Concrete roles differ only in their system prompt, generation
//! parameters, prompt construction, and an optional pre-call peer consult.
//! Everything else (gateway call, parsing, fail-soft) is shared in
//! [`LlmAgent`](crate::agents::llm_agent::LlmAgent).

use icgl_domain::{AgentResult, AgentRole, Problem};

const RESPONSE_FORMAT: &str = r#"Respond with a single JSON object:
{
  "analysis": "<your assessment>",
  "recommendations": ["<action>", ...],
  "concerns": ["<risk or objection>", ...],
  "confidence": <0.0-1.0>,
  "references": ["<policy or ADR id>", ...],
  "file_changes": [{"path": "...", "action": "create|modify|delete", "summary": "..."}]
}"#;

/// Static description of one role's behavior.
#[derive(Debug, Clone)]
pub struct RoleProfile {
    pub role: AgentRole,
    pub system_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Peer role consulted point-to-point before building the prompt
    pub consults: Option<AgentRole>,
}

impl RoleProfile {
    /// The default profile for a role.
    pub fn for_role(role: AgentRole) -> Self {
        let (persona, consults) = match role {
            AgentRole::Architect => (
                "You are the architecture reviewer of a code governance council. \
                 Assess structural impact, coupling, and long-term maintainability.",
                None,
            ),
            AgentRole::Policy => (
                "You are the policy reviewer of a code governance council. \
                 Check the proposal against engineering policies and flag violations.",
                // Policy review reads the architecture opinion first.
                Some(AgentRole::Architect),
            ),
            AgentRole::Sentinel => (
                "You are the risk sentinel of a code governance council. \
                 Look for security exposure, data loss paths, and operational risk.",
                None,
            ),
            AgentRole::Historian => (
                "You are the historian of a code governance council. \
                 Compare the proposal against prior decisions and cite precedents.",
                None,
            ),
            AgentRole::Executive => (
                "You are the execution planner of a code governance council. \
                 Break the proposal into concrete, reviewable actions.",
                None,
            ),
            AgentRole::Mediator => (
                "You are the mediator of a code governance council. The reviewers \
                 disagree or lack confidence. Weigh their positions and give a \
                 tie-breaking assessment.",
                None,
            ),
        };

        Self {
            role,
            system_prompt: format!("{}\n\n{}", persona, RESPONSE_FORMAT),
            temperature: 0.3,
            max_tokens: 2048,
            consults,
        }
    }

    /// Build the user prompt for one problem.
    pub fn build_prompt(
        &self,
        problem: &Problem,
        kb_context: &str,
        peer_opinion: Option<&AgentResult>,
    ) -> String {
        let mut prompt = format!(
            "# Proposal: {}\n\n{}\n",
            problem.title, problem.context
        );

        if !problem.related_files.is_empty() {
            prompt.push_str("\nRelated files:\n");
            for file in &problem.related_files {
                prompt.push_str(&format!("- {}\n", file));
            }
        }

        if !kb_context.is_empty() {
            prompt.push_str(&format!("\n# Knowledge base context\n{}\n", kb_context));
        }

        if let Some(peer) = peer_opinion {
            prompt.push_str(&format!(
                "\n# Opinion from the {} reviewer\n{}\n",
                peer.role, peer.analysis
            ));
        }

        prompt
    }
}
