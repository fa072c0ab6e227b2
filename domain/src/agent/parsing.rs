//! Agent response parsing.
//!
//! Agents are asked to answer with a JSON body, but LLM replies routinely
//! wrap it in prose or a fenced code block. These functions extract the
//! structured fields from a free-form reply. Pure domain logic — no I/O,
//! no session management, just text pattern matching.

use crate::agent::result::{FileAction, FileChange};
use serde::Deserialize;

/// Confidence assigned when the reply carried no parseable JSON.
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// The structured fields extracted from an agent's LLM reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAgentResponse {
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub concerns: Vec<String>,
    pub confidence: f64,
    pub references: Vec<String>,
    pub file_changes: Vec<FileChange>,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    analysis: String,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    concerns: Vec<String>,
    confidence: Option<f64>,
    #[serde(default)]
    references: Vec<String>,
    #[serde(default)]
    file_changes: Vec<RawFileChange>,
}

#[derive(Deserialize)]
struct RawFileChange {
    path: String,
    #[serde(default = "default_action")]
    action: String,
    #[serde(default)]
    summary: String,
    content: Option<String>,
}

fn default_action() -> String {
    "modify".to_string()
}

/// Parse an agent reply into structured fields.
///
/// Tries, in order:
/// 1. a ```json fenced block;
/// 2. the outermost `{...}` span;
/// 3. fallback: the whole reply becomes `analysis` with neutral confidence.
///
/// Confidence is clamped to [0, 1]; a missing confidence falls back to 0.5.
///
/// # Examples
///
/// ```
/// use icgl_domain::parse_agent_response;
///
/// let parsed = parse_agent_response(r#"{"analysis": "fine", "confidence": 0.9}"#);
/// assert_eq!(parsed.confidence, 0.9);
///
/// let parsed = parse_agent_response("no structure at all");
/// assert_eq!(parsed.analysis, "no structure at all");
/// assert_eq!(parsed.confidence, 0.5);
/// ```
pub fn parse_agent_response(response: &str) -> ParsedAgentResponse {
    if let Some(json_str) = extract_json(response)
        && let Ok(raw) = serde_json::from_str::<RawResponse>(&json_str)
    {
        return ParsedAgentResponse {
            analysis: if raw.analysis.is_empty() {
                response.trim().to_string()
            } else {
                raw.analysis
            },
            recommendations: raw.recommendations,
            concerns: raw.concerns,
            confidence: raw.confidence.unwrap_or(FALLBACK_CONFIDENCE).clamp(0.0, 1.0),
            references: raw.references,
            file_changes: raw.file_changes.into_iter().map(into_file_change).collect(),
        };
    }

    // No usable JSON: treat the whole reply as analysis text
    ParsedAgentResponse {
        analysis: response.trim().to_string(),
        recommendations: Vec::new(),
        concerns: Vec::new(),
        confidence: FALLBACK_CONFIDENCE,
        references: Vec::new(),
        file_changes: Vec::new(),
    }
}

fn into_file_change(raw: RawFileChange) -> FileChange {
    let action = match raw.action.to_lowercase().as_str() {
        "create" | "add" => FileAction::Create,
        "delete" | "remove" => FileAction::Delete,
        _ => FileAction::Modify,
    };
    FileChange {
        path: raw.path,
        action,
        summary: raw.summary,
        content: raw.content,
    }
}

/// Pull the JSON body out of a reply, preferring fenced blocks.
fn extract_json(response: &str) -> Option<String> {
    // Fenced block first: ```json ... ```
    for fence in ["```json", "```"] {
        if let Some(start) = response.find(fence) {
            let body = &response[start + fence.len()..];
            if let Some(end) = body.find("```") {
                let candidate = body[..end].trim();
                if candidate.starts_with('{') {
                    return Some(candidate.to_string());
                }
            }
        }
    }

    // Outermost brace span
    if let Some(start) = response.find('{')
        && let Some(end) = response[start..].rfind('}')
    {
        return Some(response[start..start + end + 1].to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let reply = r#"{"analysis": "Schema is fine", "recommendations": ["Add index"], "concerns": [], "confidence": 0.85}"#;
        let parsed = parse_agent_response(reply);

        assert_eq!(parsed.analysis, "Schema is fine");
        assert_eq!(parsed.recommendations, vec!["Add index"]);
        assert_eq!(parsed.confidence, 0.85);
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "Here is my review:\n```json\n{\"analysis\": \"ok\", \"confidence\": 0.7, \"concerns\": [\"No tests\"]}\n```\nThanks.";
        let parsed = parse_agent_response(reply);

        assert_eq!(parsed.analysis, "ok");
        assert_eq!(parsed.concerns, vec!["No tests"]);
        assert_eq!(parsed.confidence, 0.7);
    }

    #[test]
    fn test_parse_json_embedded_in_prose() {
        let reply = r#"My assessment follows. {"analysis": "risky", "confidence": 0.3} End."#;
        let parsed = parse_agent_response(reply);
        assert_eq!(parsed.analysis, "risky");
        assert_eq!(parsed.confidence, 0.3);
    }

    #[test]
    fn test_fallback_to_plain_text() {
        let parsed = parse_agent_response("  Just an opinion, no structure.  ");
        assert_eq!(parsed.analysis, "Just an opinion, no structure.");
        assert_eq!(parsed.confidence, 0.5);
        assert!(parsed.recommendations.is_empty());
    }

    #[test]
    fn test_confidence_clamped_and_defaulted() {
        let parsed = parse_agent_response(r#"{"analysis": "x", "confidence": 3.0}"#);
        assert_eq!(parsed.confidence, 1.0);

        let parsed = parse_agent_response(r#"{"analysis": "x"}"#);
        assert_eq!(parsed.confidence, 0.5);
    }

    #[test]
    fn test_file_change_actions() {
        let reply = r#"{"analysis": "x", "confidence": 0.9, "file_changes": [
            {"path": "a.rs", "action": "create", "summary": "new module"},
            {"path": "b.rs", "action": "remove", "summary": "dead code"},
            {"path": "c.rs", "summary": "tweak"}
        ]}"#;
        let parsed = parse_agent_response(reply);

        assert_eq!(parsed.file_changes[0].action, FileAction::Create);
        assert_eq!(parsed.file_changes[1].action, FileAction::Delete);
        assert_eq!(parsed.file_changes[2].action, FileAction::Modify);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let parsed = parse_agent_response(r#"{"analysis": unterminated"#);
        assert_eq!(parsed.confidence, 0.5);
        assert!(parsed.analysis.contains("unterminated"));
    }
}
