//! In-memory knowledge store.
//!
//! Backs the [`KnowledgeStore`] port for tests and single-process hosts.
//! Durable persistence is an external collaborator and plugs in behind the
//! same port.

use async_trait::async_trait;
use icgl_application::{KnowledgeStore, StoreError};
use icgl_domain::{AdrRecord, Policy};
use std::collections::HashMap;
use std::sync::RwLock;

/// `RwLock<HashMap>`-backed knowledge store.
#[derive(Default)]
pub struct InMemoryKnowledgeStore {
    adrs: RwLock<HashMap<String, AdrRecord>>,
    policies: RwLock<HashMap<String, Policy>>,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an ADR.
    pub fn put_adr(&self, adr: AdrRecord) {
        self.adrs
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .insert(adr.id.clone(), adr);
    }

    /// Insert or replace a policy.
    pub fn put_policy(&self, policy: Policy) {
        self.policies
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .insert(policy.id.clone(), policy);
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn adr(&self, id: &str) -> Result<Option<AdrRecord>, StoreError> {
        Ok(self
            .adrs
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(id)
            .cloned())
    }

    async fn adrs(&self) -> Result<Vec<AdrRecord>, StoreError> {
        Ok(self
            .adrs
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .values()
            .cloned()
            .collect())
    }

    async fn policy(&self, id: &str) -> Result<Option<Policy>, StoreError> {
        Ok(self
            .policies
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(id)
            .cloned())
    }

    async fn policies(&self) -> Result<Vec<Policy>, StoreError> {
        Ok(self
            .policies
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .values()
            .cloned()
            .collect())
    }
}
