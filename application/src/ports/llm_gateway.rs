//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers. The core
//! treats the call as opaque: prompt in, text plus token counters out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// One completed generation
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub usage: TokenUsage,
}

/// Parameters for one generation call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub system_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: system_prompt.into(),
            temperature: 0.3,
            max_tokens: 2048,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer reaches LLM providers.
/// Implementations must reject on transport failure; catching and degrading
/// is the agent wrapper's responsibility, not the gateway's.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate a completion for the given request
    async fn generate(&self, request: &GenerateRequest) -> Result<Completion, GatewayError>;
}
