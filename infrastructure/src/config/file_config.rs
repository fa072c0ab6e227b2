//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! are deserialized directly. [`FileConfig::to_analysis_params`] converts
//! them into the application-layer parameter type.

use icgl_application::AnalysisParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw analysis limits from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalysisConfig {
    /// Maximum nested consultation rounds
    pub max_consultation_depth: u32,
    /// Per-agent call timeout in seconds; 0 disables the timeout
    pub agent_timeout_seconds: u64,
    /// Token ceiling for one analysis session
    pub token_budget: u64,
}

impl Default for FileAnalysisConfig {
    fn default() -> Self {
        let defaults = AnalysisParams::default();
        Self {
            max_consultation_depth: defaults.max_consultation_depth,
            agent_timeout_seconds: defaults
                .agent_timeout
                .map(|t| t.as_secs())
                .unwrap_or_default(),
            token_budget: defaults.token_budget,
        }
    }
}

/// Raw sign-off configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSignoffConfig {
    /// Skip human review and synthesize approvals. Audit-visible.
    pub auto_approve: bool,
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path of the JSONL intervention log; `None` disables it
    pub intervention_log: Option<String>,
}

/// The full configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub analysis: FileAnalysisConfig,
    pub signoff: FileSignoffConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Convert the raw file values into analysis parameters.
    pub fn to_analysis_params(&self) -> AnalysisParams {
        let timeout = if self.analysis.agent_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.analysis.agent_timeout_seconds))
        };

        AnalysisParams::default()
            .with_max_consultation_depth(self.analysis.max_consultation_depth)
            .with_agent_timeout(timeout)
            .with_token_budget(self.analysis.token_budget)
            .with_auto_approve(self.signoff.auto_approve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_analysis_params() {
        let params = FileConfig::default().to_analysis_params();
        let reference = AnalysisParams::default();

        assert_eq!(params.max_consultation_depth, reference.max_consultation_depth);
        assert_eq!(params.agent_timeout, reference.agent_timeout);
        assert_eq!(params.token_budget, reference.token_budget);
        assert!(!params.auto_approve);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = FileConfig {
            analysis: FileAnalysisConfig {
                agent_timeout_seconds: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.to_analysis_params().agent_timeout.is_none());
    }

    #[test]
    fn test_parses_from_toml() {
        let config: FileConfig = toml::from_str(
            r#"
            [analysis]
            max_consultation_depth = 5
            token_budget = 50000

            [signoff]
            auto_approve = true

            [logging]
            intervention_log = "/var/log/icgl/interventions.jsonl"
            "#,
        )
        .unwrap();

        let params = config.to_analysis_params();
        assert_eq!(params.max_consultation_depth, 5);
        assert_eq!(params.token_budget, 50_000);
        assert!(params.auto_approve);
        assert!(config.logging.intervention_log.is_some());
    }
}
