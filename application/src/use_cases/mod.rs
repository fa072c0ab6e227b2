//! Use cases: the registry fan-out pipeline and the human sign-off gate.

pub mod run_analysis;
pub mod sign_off;

pub use run_analysis::{AgentRegistry, RoundOutcome};
pub use sign_off::{AUTO_APPROVE_RATIONALE, AUTO_APPROVE_SIGNER, SignoffGate};
