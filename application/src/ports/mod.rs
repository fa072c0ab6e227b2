//! Ports: the application layer's interfaces to the outside world.
//!
//! Adapters live in the infrastructure layer (or in the host process for
//! LLM transport and persistence).

pub mod intervention_log;
pub mod knowledge_store;
pub mod llm_gateway;
pub mod signoff;
