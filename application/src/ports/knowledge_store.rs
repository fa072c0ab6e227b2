//! Knowledge store port
//!
//! Read access to past ADRs and governance policies. The core never assumes
//! a storage format; reads must be idempotent. Persistence itself is an
//! external collaborator.

use async_trait::async_trait;
use icgl_domain::{AdrRecord, Policy};
use thiserror::Error;

/// Errors surfaced by a knowledge store adapter
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

/// Lookup-by-id and list-all access to ADRs and policies.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    async fn adr(&self, id: &str) -> Result<Option<AdrRecord>, StoreError>;

    async fn adrs(&self) -> Result<Vec<AdrRecord>, StoreError>;

    async fn policy(&self, id: &str) -> Result<Option<Policy>, StoreError>;

    async fn policies(&self) -> Result<Vec<Policy>, StoreError>;
}
