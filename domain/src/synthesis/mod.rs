//! Synthesis: deterministic aggregation of agent results into consensus.

pub mod consensus;
pub mod result;

pub use consensus::{
    CONSENSUS_AGREEMENT_COUNT, MEDIATION_CONCERN_LIMIT, MEDIATION_CONFIDENCE_FLOOR,
    needs_mediation, synthesize,
};
pub use result::{Mediation, SynthesizedResult};
