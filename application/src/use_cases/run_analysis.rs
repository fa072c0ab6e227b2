//! The agent registry: concurrent fan-out, synthesis, and mediator
//! escalation.
//!
//! The registry owns the set of registered agents and the gateway handle it
//! injects into each. Fan-out launches every eligible agent as a concurrent
//! task and waits for all of them to settle; budget and depth are checked
//! only at round boundaries, so the accounting context needs no locking.

use crate::agents::llm_agent::{AgentReply, LlmAgent, RoleAgent};
use crate::agents::profile::RoleProfile;
use crate::config::AnalysisParams;
use crate::ports::llm_gateway::LlmGateway;
use icgl_domain::{
    AgentResult, AgentRole, AnalysisContext, BudgetTracker, Mediation, Problem, SynthesizedResult,
    needs_mediation, synthesize,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// The settled results of one fan-out round plus its token cost.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub results: Vec<AgentResult>,
    pub tokens_used: u64,
}

/// Owns the registered agents and runs the analysis pipeline.
///
/// Constructed explicitly by the process entry point and injected wherever
/// analysis is needed; there is no ambient global registry.
pub struct AgentRegistry {
    agents: BTreeMap<AgentRole, Arc<dyn RoleAgent>>,
    budget: BudgetTracker,
    params: AnalysisParams,
}

impl AgentRegistry {
    /// Empty registry with the given limits.
    pub fn new(params: AnalysisParams) -> Self {
        Self {
            agents: BTreeMap::new(),
            budget: BudgetTracker::new(params.token_budget),
            params,
        }
    }

    /// Registry with the standard persona set, all sharing one gateway.
    ///
    /// Peer consults declared in the role profiles are wired here (the
    /// policy agent reads the architect's opinion before forming its own).
    pub fn standard(gateway: Arc<dyn LlmGateway>, params: AnalysisParams) -> Self {
        let mut registry = Self::new(params);

        for role in AgentRole::ALL {
            let profile = RoleProfile::for_role(role);
            let mut agent = LlmAgent::new(profile.clone(), Arc::clone(&gateway));
            if let Some(peer_role) = profile.consults
                && let Some(peer) = registry.agents.get(&peer_role)
            {
                agent = agent.with_peer(Arc::clone(peer));
            }
            registry.register(Arc::new(agent));
        }

        registry
    }

    /// Register (or replace) the agent for its role.
    pub fn register(&mut self, agent: Arc<dyn RoleAgent>) {
        self.agents.insert(agent.role(), agent);
    }

    /// Typed lookup. String→role resolution belongs at the caller's boundary.
    pub fn get(&self, role: AgentRole) -> Option<&Arc<dyn RoleAgent>> {
        self.agents.get(&role)
    }

    /// Number of registered agents
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Fan out to every registered agent except the mediator.
    pub async fn run_all(
        &self,
        problem: &Problem,
        kb_context: &str,
        ctx: &AnalysisContext,
    ) -> RoundOutcome {
        self.run_subset(problem, kb_context, &[], &[], ctx).await
    }

    /// Fan out to the agents in the allow-list (empty list = all), skipping
    /// the mediator and any agent whose id already appears in
    /// `precomputed_results` (idempotent re-entry for recursive rounds).
    pub async fn run_subset(
        &self,
        problem: &Problem,
        kb_context: &str,
        allowed_roles: &[AgentRole],
        precomputed_results: &[AgentResult],
        ctx: &AnalysisContext,
    ) -> RoundOutcome {
        let eligible: Vec<Arc<dyn RoleAgent>> = self
            .agents
            .values()
            .filter(|agent| !agent.role().is_mediator())
            .filter(|agent| allowed_roles.is_empty() || allowed_roles.contains(&agent.role()))
            .filter(|agent| {
                !precomputed_results
                    .iter()
                    .any(|r| r.agent_id == *agent.id())
            })
            .cloned()
            .collect();

        info!(
            "Fanning out to {} agents (depth {})",
            eligible.len(),
            ctx.consultation_depth
        );

        let mut join_set = JoinSet::new();
        let timeout = self.params.agent_timeout;

        for agent in eligible {
            let problem = problem.clone();
            let kb_context = kb_context.to_string();
            let ctx = *ctx;

            join_set.spawn(async move {
                let id = agent.id().clone();
                let role = agent.role();

                let reply = match timeout {
                    Some(limit) => {
                        match tokio::time::timeout(limit, agent.analyze(&problem, &kb_context, &ctx))
                            .await
                        {
                            Ok(reply) => reply,
                            // A hung call degrades exactly like a failed one.
                            Err(_) => AgentReply {
                                result: AgentResult::degraded(
                                    id.clone(),
                                    role,
                                    &format!("timed out after {:?}", limit),
                                ),
                                tokens_used: 0,
                            },
                        }
                    }
                    None => agent.analyze(&problem, &kb_context, &ctx).await,
                };

                (id, reply)
            });
        }

        let mut results = Vec::new();
        let mut tokens_used = 0u64;

        // Barrier: synthesis must not start until every agent settled.
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((id, reply)) => {
                    debug!(
                        "{} completed (confidence {:.2}, {} tokens)",
                        id, reply.result.confidence, reply.tokens_used
                    );
                    tokens_used += reply.tokens_used;
                    results.push(reply.result);
                }
                Err(e) => {
                    warn!("Agent task join error: {}", e);
                }
            }
        }

        RoundOutcome {
            results,
            tokens_used,
        }
    }

    /// Recursive entry point: fan out, accumulate, synthesize, escalate.
    ///
    /// Depth and budget are enforced before any new calls; hitting either
    /// ceiling synthesizes over the results accumulated so far without
    /// further agent calls (including mediation). Both are planned degrade
    /// paths, not errors.
    pub async fn run_and_synthesize_dynamic(
        &self,
        problem: &Problem,
        kb_context: &str,
        allowed_roles: &[AgentRole],
        precomputed_results: Vec<AgentResult>,
        ctx: AnalysisContext,
    ) -> (SynthesizedResult, AnalysisContext) {
        if ctx.consultation_depth >= self.params.max_consultation_depth {
            info!(
                "Consultation depth {} reached; synthesizing {} precomputed results",
                ctx.consultation_depth,
                precomputed_results.len()
            );
            return (synthesize(precomputed_results), ctx);
        }

        if !self.budget.check_usage(ctx.total_tokens) {
            let status = self.budget.status(ctx.total_tokens);
            info!(
                "Token budget exhausted ({}/{}); synthesizing partial results",
                status.used, status.limit
            );
            return (synthesize(precomputed_results), ctx);
        }

        let ctx = ctx.deeper();
        let outcome = self
            .run_subset(problem, kb_context, allowed_roles, &precomputed_results, &ctx)
            .await;
        let ctx = ctx.add_tokens(outcome.tokens_used);

        let mut results = precomputed_results;
        results.extend(outcome.results);

        let synthesis = synthesize(results);

        if needs_mediation(&synthesis) {
            self.mediate(problem, kb_context, synthesis, ctx).await
        } else {
            (synthesis, ctx)
        }
    }

    /// Consult the mediator with the full result set and attach its verdict.
    ///
    /// Attached at most once per synthesis. A missing or failed mediator is
    /// fail-soft: the synthesis is returned without a verdict.
    async fn mediate(
        &self,
        problem: &Problem,
        kb_context: &str,
        mut synthesis: SynthesizedResult,
        ctx: AnalysisContext,
    ) -> (SynthesizedResult, AnalysisContext) {
        let Some(mediator) = self.get(AgentRole::Mediator) else {
            warn!("Mediation triggered but no mediator is registered");
            return (synthesis, ctx);
        };

        info!(
            "Escalating to mediator (confidence {:.2}, {} concerns)",
            synthesis.overall_confidence,
            synthesis.all_concerns.len()
        );

        let serialized = serde_json::to_string_pretty(&synthesis.individual_results)
            .unwrap_or_else(|_| "[]".to_string());
        let consultation = Problem::new(
            format!("Mediation: {}", problem.title),
            format!(
                "{}\n\n# Individual agent results\n{}",
                problem.context, serialized
            ),
        );

        let reply = mediator.analyze(&consultation, kb_context, &ctx).await;
        let ctx = ctx.add_tokens(reply.tokens_used);

        synthesis.mediation = Some(Mediation {
            analysis: reply.result.analysis,
            confidence: reply.result.confidence,
            recommendations: reply.result.recommendations,
        });

        (synthesis, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use icgl_domain::AgentId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Agent returning a canned result, with call counting and optional delay.
    struct ScriptedAgent {
        id: AgentId,
        role: AgentRole,
        confidence: f64,
        recommendations: Vec<String>,
        concerns: Vec<String>,
        tokens: u64,
        delay: Option<Duration>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedAgent {
        fn new(role: AgentRole, confidence: f64) -> Self {
            Self {
                id: AgentId::new(format!("{}-agent", role)),
                role,
                confidence,
                recommendations: Vec::new(),
                concerns: Vec::new(),
                tokens: 100,
                delay: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn recommending(mut self, rec: &str) -> Self {
            self.recommendations.push(rec.to_string());
            self
        }

        fn concerned_about(mut self, concern: &str) -> Self {
            self.concerns.push(concern.to_string());
            self
        }

        fn delayed(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn call_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl RoleAgent for ScriptedAgent {
        fn id(&self) -> &AgentId {
            &self.id
        }

        fn role(&self) -> AgentRole {
            self.role
        }

        async fn analyze(
            &self,
            _problem: &Problem,
            _kb_context: &str,
            _ctx: &AnalysisContext,
        ) -> AgentReply {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let mut result =
                AgentResult::new(self.id.clone(), self.role, "scripted", self.confidence);
            result.recommendations = self.recommendations.clone();
            result.concerns = self.concerns.clone();

            AgentReply {
                result,
                tokens_used: self.tokens,
            }
        }
    }

    /// Agent that panics if ever invoked.
    struct PanickingAgent {
        id: AgentId,
        role: AgentRole,
    }

    #[async_trait]
    impl RoleAgent for PanickingAgent {
        fn id(&self) -> &AgentId {
            &self.id
        }

        fn role(&self) -> AgentRole {
            self.role
        }

        async fn analyze(
            &self,
            _problem: &Problem,
            _kb_context: &str,
            _ctx: &AnalysisContext,
        ) -> AgentReply {
            panic!("must not be called");
        }
    }

    fn problem() -> Problem {
        Problem::new("Add caching layer", "API latency is too high")
    }

    fn registry_with(agents: Vec<ScriptedAgent>, params: AnalysisParams) -> AgentRegistry {
        let mut registry = AgentRegistry::new(params);
        for agent in agents {
            registry.register(Arc::new(agent));
        }
        registry
    }

    #[tokio::test]
    async fn test_run_all_excludes_mediator() {
        let mediator = ScriptedAgent::new(AgentRole::Mediator, 0.9);
        let mediator_calls = mediator.call_counter();

        let registry = registry_with(
            vec![
                ScriptedAgent::new(AgentRole::Architect, 0.9),
                ScriptedAgent::new(AgentRole::Policy, 0.8),
                mediator,
            ],
            AnalysisParams::default(),
        );

        let outcome = registry
            .run_all(&problem(), "", &AnalysisContext::new())
            .await;

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(mediator_calls.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.tokens_used, 200);
    }

    #[tokio::test]
    async fn test_run_subset_filters_and_skips_precomputed() {
        let architect = ScriptedAgent::new(AgentRole::Architect, 0.9);
        let architect_calls = architect.call_counter();
        let sentinel = ScriptedAgent::new(AgentRole::Sentinel, 0.8);
        let sentinel_calls = sentinel.call_counter();

        let registry = registry_with(
            vec![architect, sentinel, ScriptedAgent::new(AgentRole::Policy, 0.7)],
            AnalysisParams::default(),
        );

        // Architect already has a precomputed result; only sentinel runs.
        let precomputed = vec![AgentResult::new(
            "architect-agent",
            AgentRole::Architect,
            "prior",
            0.9,
        )];
        let outcome = registry
            .run_subset(
                &problem(),
                "",
                &[AgentRole::Architect, AgentRole::Sentinel],
                &precomputed,
                &AnalysisContext::new(),
            )
            .await;

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].role, AgentRole::Sentinel);
        assert_eq!(architect_calls.load(Ordering::SeqCst), 0);
        assert_eq!(sentinel_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_agent_times_out_into_degraded_result() {
        let registry = registry_with(
            vec![
                ScriptedAgent::new(AgentRole::Architect, 0.9),
                ScriptedAgent::new(AgentRole::Sentinel, 0.8)
                    .delayed(Duration::from_secs(3600)),
            ],
            AnalysisParams::default().with_agent_timeout(Some(Duration::from_secs(5))),
        );

        let outcome = registry
            .run_all(&problem(), "", &AnalysisContext::new())
            .await;

        assert_eq!(outcome.results.len(), 2);
        let degraded = outcome
            .results
            .iter()
            .find(|r| r.role == AgentRole::Sentinel)
            .unwrap();
        assert_eq!(degraded.confidence, 0.0);
        assert!(degraded.analysis.contains("timed out"));
    }

    #[tokio::test]
    async fn test_depth_ceiling_synthesizes_precomputed_only() {
        let architect = ScriptedAgent::new(AgentRole::Architect, 0.9);
        let calls = architect.call_counter();
        let registry = registry_with(
            vec![architect],
            AnalysisParams::default().with_max_consultation_depth(2),
        );

        let precomputed = vec![
            AgentResult::new("x", AgentRole::Policy, "prior", 0.6),
            AgentResult::new("y", AgentRole::Sentinel, "prior", 0.8),
        ];
        let ctx = AnalysisContext::new().deeper().deeper(); // at the ceiling

        let (synthesis, out_ctx) = registry
            .run_and_synthesize_dynamic(&problem(), "", &[], precomputed.clone(), ctx)
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(synthesis.individual_results.len(), precomputed.len());
        assert_eq!(out_ctx, ctx);
        assert!((synthesis.overall_confidence - 0.7).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_budget_ceiling_synthesizes_partial_results() {
        let mut registry = AgentRegistry::new(
            AnalysisParams::default().with_token_budget(1_000),
        );
        registry.register(Arc::new(PanickingAgent {
            id: AgentId::new("architect-agent"),
            role: AgentRole::Architect,
        }));

        let precomputed = vec![AgentResult::new("x", AgentRole::Policy, "prior", 0.9)];
        let ctx = AnalysisContext::new().add_tokens(1_000); // budget spent

        let (synthesis, _) = registry
            .run_and_synthesize_dynamic(&problem(), "", &[], precomputed, ctx)
            .await;

        assert_eq!(synthesis.individual_results.len(), 1);
        assert!(synthesis.mediation.is_none());
    }

    #[tokio::test]
    async fn test_mediator_invoked_on_low_confidence() {
        let mediator = ScriptedAgent::new(AgentRole::Mediator, 0.9)
            .recommending("Stage the rollout");
        let mediator_calls = mediator.call_counter();

        let registry = registry_with(
            vec![
                ScriptedAgent::new(AgentRole::Architect, 0.9),
                ScriptedAgent::new(AgentRole::Policy, 0.5),
                ScriptedAgent::new(AgentRole::Sentinel, 0.4),
                mediator,
            ],
            AnalysisParams::default(),
        );

        let (synthesis, _) = registry
            .run_and_synthesize_dynamic(&problem(), "", &[], vec![], AnalysisContext::new())
            .await;

        // Mean 0.6 < 0.7 triggers exactly one mediator consult.
        assert_eq!(mediator_calls.load(Ordering::SeqCst), 1);
        let mediation = synthesis.mediation.unwrap();
        assert_eq!(mediation.recommendations, vec!["Stage the rollout"]);
    }

    #[tokio::test]
    async fn test_mediator_not_invoked_when_confident() {
        let mediator = ScriptedAgent::new(AgentRole::Mediator, 0.9);
        let mediator_calls = mediator.call_counter();

        let registry = registry_with(
            vec![
                ScriptedAgent::new(AgentRole::Architect, 0.9),
                ScriptedAgent::new(AgentRole::Policy, 0.85).concerned_about("minor"),
                ScriptedAgent::new(AgentRole::Sentinel, 0.95),
                mediator,
            ],
            AnalysisParams::default(),
        );

        let (synthesis, _) = registry
            .run_and_synthesize_dynamic(&problem(), "", &[], vec![], AnalysisContext::new())
            .await;

        assert_eq!(mediator_calls.load(Ordering::SeqCst), 0);
        assert!(synthesis.mediation.is_none());
    }

    #[tokio::test]
    async fn test_missing_mediator_is_fail_soft() {
        let registry = registry_with(
            vec![ScriptedAgent::new(AgentRole::Architect, 0.2)],
            AnalysisParams::default(),
        );

        let (synthesis, _) = registry
            .run_and_synthesize_dynamic(&problem(), "", &[], vec![], AnalysisContext::new())
            .await;

        assert!(synthesis.mediation.is_none());
        assert_eq!(synthesis.individual_results.len(), 1);
    }

    #[tokio::test]
    async fn test_context_accumulates_tokens_across_round() {
        let registry = registry_with(
            vec![
                ScriptedAgent::new(AgentRole::Architect, 0.9),
                ScriptedAgent::new(AgentRole::Policy, 0.9),
            ],
            AnalysisParams::default(),
        );

        let (_, ctx) = registry
            .run_and_synthesize_dynamic(&problem(), "", &[], vec![], AnalysisContext::new())
            .await;

        assert_eq!(ctx.total_tokens, 200);
        assert_eq!(ctx.consultation_depth, 1);
    }

    #[tokio::test]
    async fn test_end_to_end_low_confidence_scenario() {
        // Three agents at [0.6, 0.5, 0.55], all recommending "Add Redis".
        let mediator = ScriptedAgent::new(AgentRole::Mediator, 0.85);
        let mediator_calls = mediator.call_counter();

        let registry = registry_with(
            vec![
                ScriptedAgent::new(AgentRole::Architect, 0.6).recommending("Add Redis"),
                ScriptedAgent::new(AgentRole::Policy, 0.5).recommending("Add Redis"),
                ScriptedAgent::new(AgentRole::Sentinel, 0.55).recommending("Add Redis"),
                mediator,
            ],
            AnalysisParams::default(),
        );

        let (synthesis, _) = registry
            .run_and_synthesize_dynamic(&problem(), "", &[], vec![], AnalysisContext::new())
            .await;

        assert!((synthesis.overall_confidence - 0.55).abs() < 1e-12);
        assert_eq!(mediator_calls.load(Ordering::SeqCst), 1);
        assert!(synthesis.mediation.is_some());
        assert!(
            synthesis
                .consensus_recommendations
                .iter()
                .any(|r| r == "Add Redis")
        );
    }
}
