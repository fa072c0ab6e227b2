//! The synthesis algorithm and the mediation escalation predicate.
//!
//! All aggregation here is count/set based so the outcome is independent of
//! the order in which concurrent agents happened to complete.

use super::result::SynthesizedResult;
use crate::agent::result::AgentResult;
use std::collections::{HashMap, HashSet};

/// A recommendation stated by at least this many distinct agents is
/// consensus. An agent repeating itself counts once.
///
/// Deliberately an absolute count, not a fraction of the pool: with 2 agents
/// total any shared recommendation passes, and with 10 agents the bar is
/// still 2. Kept as observed in production pending a product decision.
pub const CONSENSUS_AGREEMENT_COUNT: usize = 2;

/// Synthesis below this overall confidence escalates to the mediator.
pub const MEDIATION_CONFIDENCE_FLOOR: f64 = 0.7;

/// More concerns than this escalates to the mediator.
pub const MEDIATION_CONCERN_LIMIT: usize = 3;

/// Number of fallback recommendations kept when nothing reaches consensus.
const FALLBACK_RECOMMENDATION_COUNT: usize = 3;

/// Merge individual agent results into a single consensus view.
///
/// - Recommendations are counted case-insensitively; those stated by
///   [`CONSENSUS_AGREEMENT_COUNT`] or more agents become consensus. If none
///   qualify, the first three recommendations encountered are kept so
///   downstream consumers are never starved.
/// - Concerns are unioned and deduplicated; their order is not a contract.
/// - Overall confidence is the arithmetic mean of individual confidences.
/// - File changes are concatenated in agent order, without deduplication.
///
/// # Example
///
/// ```
/// use icgl_domain::{AgentResult, AgentRole, synthesize};
///
/// let results = vec![
///     AgentResult::new("a", AgentRole::Architect, "ok", 0.9).with_recommendation("Add Redis"),
///     AgentResult::new("p", AgentRole::Policy, "ok", 0.7).with_recommendation("add redis"),
/// ];
/// let synthesis = synthesize(results);
/// assert_eq!(synthesis.consensus_recommendations, vec!["Add Redis"]);
/// assert!((synthesis.overall_confidence - 0.8).abs() < 1e-9);
/// ```
pub fn synthesize(results: Vec<AgentResult>) -> SynthesizedResult {
    if results.is_empty() {
        return SynthesizedResult::empty();
    }

    let consensus_recommendations = consensus_recommendations(&results);
    let all_concerns = deduplicated_concerns(&results);

    let overall_confidence =
        results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64;

    let file_changes = results
        .iter()
        .flat_map(|r| r.file_changes.iter().cloned())
        .collect();

    SynthesizedResult {
        individual_results: results,
        consensus_recommendations,
        all_concerns,
        overall_confidence,
        mediation: None,
        file_changes,
    }
}

/// Whether a synthesis should be escalated to the mediator.
///
/// Triggers on `overall_confidence < MEDIATION_CONFIDENCE_FLOOR` (strict) or
/// more than [`MEDIATION_CONCERN_LIMIT`] distinct concerns.
pub fn needs_mediation(synthesis: &SynthesizedResult) -> bool {
    synthesis.overall_confidence < MEDIATION_CONFIDENCE_FLOOR
        || synthesis.all_concerns.len() > MEDIATION_CONCERN_LIMIT
}

fn consensus_recommendations(results: &[AgentResult]) -> Vec<String> {
    // Count distinct agents, case-insensitively; an agent repeating itself
    // counts once. Remember the first-seen casing for display.
    let mut counts: HashMap<String, (usize, &str)> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for result in results {
        let mut stated: HashSet<String> = HashSet::new();
        for rec in &result.recommendations {
            let key = rec.to_lowercase();
            if !stated.insert(key.clone()) {
                continue;
            }
            match counts.get_mut(&key) {
                Some(entry) => entry.0 += 1,
                None => {
                    counts.insert(key.clone(), (1, rec.as_str()));
                    order.push(key);
                }
            }
        }
    }

    let consensus: Vec<String> = order
        .iter()
        .filter_map(|key| {
            let (count, original) = counts[key];
            (count >= CONSENSUS_AGREEMENT_COUNT).then(|| original.to_string())
        })
        .collect();

    if !consensus.is_empty() {
        return consensus;
    }

    // No agreement: keep the first few recommendations encountered so
    // downstream consumers still have something to act on.
    results
        .iter()
        .flat_map(|r| r.recommendations.iter().cloned())
        .take(FALLBACK_RECOMMENDATION_COUNT)
        .collect()
}

fn deduplicated_concerns(results: &[AgentResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut concerns = Vec::new();

    for result in results {
        for concern in &result.concerns {
            if seen.insert(concern.to_lowercase()) {
                concerns.push(concern.clone());
            }
        }
    }

    concerns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::result::{FileAction, FileChange};
    use crate::agent::role::AgentRole;
    use std::collections::HashSet;

    fn result(id: &str, role: AgentRole, confidence: f64) -> AgentResult {
        AgentResult::new(id, role, "analysis", confidence)
    }

    #[test]
    fn test_empty_input_yields_zero_confidence() {
        let synthesis = synthesize(vec![]);
        assert_eq!(synthesis.overall_confidence, 0.0);
        assert!(synthesis.consensus_recommendations.is_empty());
        assert!(synthesis.individual_results.is_empty());
    }

    #[test]
    fn test_two_agreeing_agents_reach_consensus() {
        let results = vec![
            result("a", AgentRole::Architect, 0.9).with_recommendation("Add Redis"),
            result("p", AgentRole::Policy, 0.8).with_recommendation("add redis"),
            result("s", AgentRole::Sentinel, 0.8).with_recommendation("Audit deps"),
        ];

        let synthesis = synthesize(results);
        assert_eq!(synthesis.consensus_recommendations, vec!["Add Redis"]);
    }

    #[test]
    fn test_threshold_is_absolute_not_proportional() {
        // 10 agents, only 2 agree: still consensus.
        let mut results: Vec<AgentResult> = (0..8)
            .map(|i| {
                result(&format!("a{}", i), AgentRole::Historian, 0.9)
                    .with_recommendation(format!("unique-{}", i))
            })
            .collect();
        results.push(result("x", AgentRole::Architect, 0.9).with_recommendation("Shared idea"));
        results.push(result("y", AgentRole::Policy, 0.9).with_recommendation("shared idea"));

        let synthesis = synthesize(results);
        assert_eq!(synthesis.consensus_recommendations, vec!["Shared idea"]);
    }

    #[test]
    fn test_one_agent_repeating_itself_is_not_consensus() {
        let results = vec![
            result("a", AgentRole::Architect, 0.9)
                .with_recommendation("Add Redis")
                .with_recommendation("add redis"),
            result("p", AgentRole::Policy, 0.9).with_recommendation("Audit deps"),
        ];

        // No second agent agrees, so nothing reaches consensus and the
        // fallback kicks in instead.
        let synthesis = synthesize(results);
        assert_eq!(
            synthesis.consensus_recommendations,
            vec!["Add Redis", "add redis", "Audit deps"]
        );

        // A genuine second voice still qualifies.
        let results = vec![
            result("a", AgentRole::Architect, 0.9)
                .with_recommendation("Add Redis")
                .with_recommendation("add redis"),
            result("p", AgentRole::Policy, 0.9).with_recommendation("ADD REDIS"),
        ];
        let synthesis = synthesize(results);
        assert_eq!(synthesis.consensus_recommendations, vec!["Add Redis"]);
    }

    #[test]
    fn test_no_agreement_falls_back_to_first_three() {
        let results = vec![
            result("a", AgentRole::Architect, 0.9)
                .with_recommendation("One")
                .with_recommendation("Two"),
            result("p", AgentRole::Policy, 0.9)
                .with_recommendation("Three")
                .with_recommendation("Four"),
        ];

        let synthesis = synthesize(results);
        assert_eq!(synthesis.consensus_recommendations, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_single_agent_fallback() {
        let results = vec![
            result("a", AgentRole::Architect, 0.9)
                .with_recommendation("Only one")
                .with_recommendation("And two"),
        ];

        let synthesis = synthesize(results);
        assert_eq!(synthesis.consensus_recommendations, vec!["Only one", "And two"]);
    }

    #[test]
    fn test_confidence_is_exact_mean() {
        let results = vec![
            result("a", AgentRole::Architect, 0.6),
            result("p", AgentRole::Policy, 0.5),
            result("s", AgentRole::Sentinel, 0.55),
        ];

        let synthesis = synthesize(results);
        assert!((synthesis.overall_confidence - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_concerns_are_deduplicated() {
        let results = vec![
            result("a", AgentRole::Architect, 0.9)
                .with_concern("No tests")
                .with_concern("Unclear rollback"),
            result("p", AgentRole::Policy, 0.9).with_concern("no tests"),
        ];

        let synthesis = synthesize(results);
        assert_eq!(synthesis.all_concerns.len(), 2);
    }

    #[test]
    fn test_file_changes_concatenated_in_agent_order() {
        let results = vec![
            result("a", AgentRole::Architect, 0.9)
                .with_file_change(FileChange::new("a.rs", FileAction::Modify, "first")),
            result("p", AgentRole::Policy, 0.9)
                .with_file_change(FileChange::new("a.rs", FileAction::Modify, "second")),
        ];

        let synthesis = synthesize(results);
        assert_eq!(synthesis.file_changes.len(), 2);
        assert_eq!(synthesis.file_changes[0].summary, "first");
        assert_eq!(synthesis.file_changes[1].summary, "second");
    }

    #[test]
    fn test_order_independence() {
        let results = vec![
            result("a", AgentRole::Architect, 0.9)
                .with_recommendation("Add Redis")
                .with_concern("Memory pressure"),
            result("p", AgentRole::Policy, 0.4).with_recommendation("add redis"),
            result("s", AgentRole::Sentinel, 0.65).with_concern("Cache poisoning"),
        ];

        let forward = synthesize(results.clone());
        let mut reversed = results;
        reversed.reverse();
        let backward = synthesize(reversed);

        let forward_set: HashSet<String> = forward
            .consensus_recommendations
            .iter()
            .map(|r| r.to_lowercase())
            .collect();
        let backward_set: HashSet<String> = backward
            .consensus_recommendations
            .iter()
            .map(|r| r.to_lowercase())
            .collect();

        assert_eq!(forward_set, backward_set);
        assert!((forward.overall_confidence - backward.overall_confidence).abs() < 1e-12);
        assert_eq!(forward.all_concerns.len(), backward.all_concerns.len());
    }

    #[test]
    fn test_mediation_trigger_on_low_confidence() {
        let synthesis = synthesize(vec![
            result("a", AgentRole::Architect, 0.9),
            result("p", AgentRole::Policy, 0.5),
            result("s", AgentRole::Sentinel, 0.4),
        ]);
        assert!(needs_mediation(&synthesis)); // mean 0.6 < 0.7
    }

    #[test]
    fn test_mediation_trigger_on_many_concerns() {
        let synthesis = synthesize(vec![
            result("a", AgentRole::Architect, 0.95)
                .with_concern("c1")
                .with_concern("c2"),
            result("p", AgentRole::Policy, 0.9)
                .with_concern("c3")
                .with_concern("c4"),
        ]);
        assert!(needs_mediation(&synthesis)); // 4 concerns > 3
    }

    #[test]
    fn test_no_mediation_when_confident_and_quiet() {
        let synthesis = synthesize(vec![
            result("a", AgentRole::Architect, 0.9),
            result("p", AgentRole::Policy, 0.85).with_concern("minor"),
            result("s", AgentRole::Sentinel, 0.95),
        ]);
        assert!(!needs_mediation(&synthesis));
    }

    #[test]
    fn test_boundary_values_do_not_trigger() {
        // Exactly 0.7 confidence and exactly 3 concerns: both strict bounds.
        let synthesis = synthesize(vec![
            result("a", AgentRole::Architect, 0.7)
                .with_concern("c1")
                .with_concern("c2")
                .with_concern("c3"),
        ]);
        assert!(!needs_mediation(&synthesis));
    }

    #[test]
    fn test_degraded_results_still_counted() {
        let results = vec![
            result("a", AgentRole::Architect, 1.0),
            AgentResult::degraded("p", AgentRole::Policy, "gateway down"),
        ];

        let synthesis = synthesize(results);
        assert_eq!(synthesis.individual_results.len(), 2);
        assert_eq!(synthesis.overall_confidence, 0.5);
        assert_eq!(synthesis.responsive_agents(), 1);
    }
}
