//! The shared LLM-backed agent implementation.
//!
//! [`LlmAgent`] wraps one gateway call with role-specific prompt
//! construction and response parsing. Its `analyze` never errors: gateway
//! and parse failures are converted into a degraded result so one agent's
//! failure can never abort the fan-out of its siblings.

use super::profile::RoleProfile;
use crate::ports::llm_gateway::{GatewayError, GenerateRequest, LlmGateway};
use async_trait::async_trait;
use icgl_domain::{
    AgentId, AgentResult, AgentRole, AnalysisContext, Problem, parse_agent_response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// One agent invocation's output plus its token cost.
///
/// The token count rides alongside the result (not inside it) so the
/// registry can fold usage into [`AnalysisContext`] at round boundaries
/// while `AgentResult` stays a pure opinion record.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub result: AgentResult,
    pub tokens_used: u64,
}

/// A registered analysis agent.
///
/// The contract is fail-soft: `analyze` must always return a well-formed
/// reply, degrading to a zero-confidence result on internal failure.
#[async_trait]
pub trait RoleAgent: Send + Sync {
    fn id(&self) -> &AgentId;

    fn role(&self) -> AgentRole;

    async fn analyze(
        &self,
        problem: &Problem,
        kb_context: &str,
        ctx: &AnalysisContext,
    ) -> AgentReply;
}

/// The generic LLM-backed role agent.
///
/// The gateway handle is injected by the registry and shared across all
/// agents; agents never own their own client lifecycle. An optional peer is
/// consulted point-to-point before the prompt is built (also fail-soft, and
/// not part of the fan-out).
pub struct LlmAgent {
    id: AgentId,
    profile: RoleProfile,
    gateway: Arc<dyn LlmGateway>,
    peer: Option<Arc<dyn RoleAgent>>,
}

impl LlmAgent {
    pub fn new(profile: RoleProfile, gateway: Arc<dyn LlmGateway>) -> Self {
        let id = AgentId::new(format!("{}-agent", profile.role));
        Self {
            id,
            profile,
            gateway,
            peer: None,
        }
    }

    /// Wire the peer this agent consults before building its prompt.
    pub fn with_peer(mut self, peer: Arc<dyn RoleAgent>) -> Self {
        self.peer = Some(peer);
        self
    }

    /// The happy path: consult the peer, call the gateway, parse the reply.
    ///
    /// Only the documented failure categories surface here (gateway
    /// transport errors); response parsing is total and degrades internally.
    async fn run(
        &self,
        problem: &Problem,
        kb_context: &str,
        ctx: &AnalysisContext,
    ) -> Result<AgentReply, GatewayError> {
        let mut tokens_used = 0u64;

        // Point-to-point peer consult, itself fail-soft.
        let peer_result = match &self.peer {
            Some(peer) => {
                debug!("{} consulting {}", self.id, peer.id());
                let reply = peer.analyze(problem, kb_context, ctx).await;
                tokens_used += reply.tokens_used;
                Some(reply.result)
            }
            None => None,
        };

        let prompt = self
            .profile
            .build_prompt(problem, kb_context, peer_result.as_ref());
        let request = GenerateRequest::new(prompt, self.profile.system_prompt.clone())
            .with_temperature(self.profile.temperature)
            .with_max_tokens(self.profile.max_tokens);

        let completion = self.gateway.generate(&request).await?;
        tokens_used += completion.usage.total_tokens;

        let parsed = parse_agent_response(&completion.content);
        let mut result = AgentResult::new(
            self.id.clone(),
            self.profile.role,
            parsed.analysis,
            parsed.confidence,
        );
        result.recommendations = parsed.recommendations;
        result.concerns = parsed.concerns;
        result.references = parsed.references;
        result.file_changes = parsed.file_changes;

        Ok(AgentReply {
            result,
            tokens_used,
        })
    }
}

#[async_trait]
impl RoleAgent for LlmAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn role(&self) -> AgentRole {
        self.profile.role
    }

    async fn analyze(
        &self,
        problem: &Problem,
        kb_context: &str,
        ctx: &AnalysisContext,
    ) -> AgentReply {
        match self.run(problem, kb_context, ctx).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("{} failed: {}", self.id, e);
                AgentReply {
                    result: AgentResult::degraded(
                        self.id.clone(),
                        self.profile.role,
                        &e.to_string(),
                    ),
                    tokens_used: 0,
                }
            }
        }
    }
}
