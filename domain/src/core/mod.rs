//! Core domain types: the analysis input and shared error type.

pub mod context;
pub mod error;
pub mod problem;

pub use context::AnalysisContext;
pub use error::DomainError;
pub use problem::Problem;
