//! The deferred signing queue.
//!
//! Used when an approval request originates from the autonomous executive
//! agent rather than the main governance cycle. Items move PENDING →
//! {SIGNED, REJECTED} exactly once; acting on a non-pending or unknown item
//! is a no-op returning `None`.

use crate::util::{current_timestamp_ms, uuid_v4};
use serde::{Deserialize, Serialize};

/// Risk classification attached by the requesting agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// State of a queue item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueItemStatus {
    Pending,
    Signed,
    Rejected,
}

/// One deferred approval request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningQueueItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// The concrete actions that will run once signed
    pub actions: Vec<String>,
    /// Which agent requested the approval
    pub agent_id: String,
    pub risk_level: RiskLevel,
    pub status: QueueItemStatus,
    /// Milliseconds since epoch
    pub created_at: u64,
    pub signed_at: Option<u64>,
    pub signed_by: Option<String>,
}

/// Append-only queue of deferred approval requests.
///
/// # Example
///
/// ```
/// use icgl_domain::{RiskLevel, SigningQueue, QueueItemStatus};
///
/// let mut queue = SigningQueue::new();
/// let item = queue.add_to_queue("Deploy", "roll out v2", vec!["git push".into()], "executive-1", RiskLevel::High);
/// let id = item.id.clone();
///
/// let signed = queue.sign_off(&id, "alice").unwrap();
/// assert_eq!(signed.status, QueueItemStatus::Signed);
/// assert!(queue.sign_off(&id, "alice").is_none()); // one-shot
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SigningQueue {
    items: Vec<SigningQueueItem>,
}

impl SigningQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new pending item and return a copy of it.
    pub fn add_to_queue(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        actions: Vec<String>,
        agent_id: impl Into<String>,
        risk_level: RiskLevel,
    ) -> SigningQueueItem {
        let item = SigningQueueItem {
            id: uuid_v4(),
            title: title.into(),
            description: description.into(),
            actions,
            agent_id: agent_id.into(),
            risk_level,
            status: QueueItemStatus::Pending,
            created_at: current_timestamp_ms(),
            signed_at: None,
            signed_by: None,
        };
        self.items.push(item.clone());
        item
    }

    /// Sign a pending item. `None` if the item is unknown or already
    /// processed; never overwrites an earlier transition.
    pub fn sign_off(&mut self, item_id: &str, human_id: &str) -> Option<SigningQueueItem> {
        self.transition(item_id, human_id, QueueItemStatus::Signed)
    }

    /// Reject a pending item, with the same one-shot semantics as
    /// [`sign_off`](Self::sign_off).
    pub fn reject(&mut self, item_id: &str, human_id: &str) -> Option<SigningQueueItem> {
        self.transition(item_id, human_id, QueueItemStatus::Rejected)
    }

    fn transition(
        &mut self,
        item_id: &str,
        human_id: &str,
        to: QueueItemStatus,
    ) -> Option<SigningQueueItem> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id && i.status == QueueItemStatus::Pending)?;

        item.status = to;
        item.signed_at = Some(current_timestamp_ms());
        item.signed_by = Some(human_id.to_string());
        Some(item.clone())
    }

    /// Look up an item by id
    pub fn get(&self, item_id: &str) -> Option<&SigningQueueItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// All items still awaiting a decision
    pub fn pending(&self) -> Vec<&SigningQueueItem> {
        self.items
            .iter()
            .filter(|i| i.status == QueueItemStatus::Pending)
            .collect()
    }

    /// Total number of items ever queued
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
