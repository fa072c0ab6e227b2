//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown agent role: {0}")]
    UnknownRole(String),

    #[error("ADR {0} is already signed")]
    AlreadySigned(String),

    #[error("Decision {decision_id} targets ADR {expected}, not {actual}")]
    DecisionMismatch {
        decision_id: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid problem: {0}")]
    InvalidProblem(String),
}
