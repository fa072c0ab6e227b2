//! Agent roles in the governance council.
//!
//! Roles are a closed enum. External lookups that arrive as strings (HTTP
//! path parameters, config files) must resolve through [`FromStr`] at the
//! boundary; the core never matches on role names.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The specialized personas that analyze a proposal.
///
/// # Example
///
/// ```
/// use icgl_domain::AgentRole;
///
/// let role: AgentRole = "Sentinel".parse().unwrap();
/// assert_eq!(role, AgentRole::Sentinel);
/// assert!(AgentRole::Mediator.is_mediator());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// System design and architecture review
    Architect,
    /// Policy compliance review
    Policy,
    /// Risk and anomaly detection
    Sentinel,
    /// Precedent lookup against past decisions
    Historian,
    /// Autonomous execution planning
    Executive,
    /// Tie-breaker consulted only on low-confidence synthesis
    Mediator,
}

impl AgentRole {
    /// All roles, in deterministic order
    pub const ALL: [AgentRole; 6] = [
        AgentRole::Architect,
        AgentRole::Policy,
        AgentRole::Sentinel,
        AgentRole::Historian,
        AgentRole::Executive,
        AgentRole::Mediator,
    ];

    /// Whether this role is the escalation mediator.
    ///
    /// The mediator is excluded from fan-out; it is only consulted when
    /// synthesis confidence is low or concerns are numerous.
    pub fn is_mediator(&self) -> bool {
        matches!(self, AgentRole::Mediator)
    }

    /// Stable lowercase name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Architect => "architect",
            AgentRole::Policy => "policy",
            AgentRole::Sentinel => "sentinel",
            AgentRole::Historian => "historian",
            AgentRole::Executive => "executive",
            AgentRole::Mediator => "mediator",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "architect" => Ok(AgentRole::Architect),
            "policy" => Ok(AgentRole::Policy),
            "sentinel" => Ok(AgentRole::Sentinel),
            "historian" => Ok(AgentRole::Historian),
            "executive" => Ok(AgentRole::Executive),
            "mediator" => Ok(AgentRole::Mediator),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}
