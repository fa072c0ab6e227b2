//! Infrastructure layer for ICGL
//!
//! Adapters for the ports defined in the application layer: configuration
//! file loading, tracing setup, the JSONL intervention log, and an
//! in-memory knowledge store.

pub mod config;
pub mod knowledge;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, FileAnalysisConfig, FileConfig, FileLoggingConfig, FileSignoffConfig};
pub use knowledge::InMemoryKnowledgeStore;
pub use logging::{JsonlInterventionLog, init_tracing};
