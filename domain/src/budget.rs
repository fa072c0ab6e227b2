//! Token budget tracking for an analysis session.
//!
//! The registry checks the budget at round boundaries; exceeding it is a
//! planned degrade (synthesize over what exists), never an error.

use serde::{Deserialize, Serialize};

/// Fraction of the limit at which the status turns to `NearLimit`.
const NEAR_LIMIT_RATIO: f64 = 0.8;

/// Default session ceiling in tokens.
pub const DEFAULT_TOKEN_LIMIT: u64 = 100_000;

/// Coarse budget state for status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    UnderBudget,
    NearLimit,
    Exceeded,
}

/// Snapshot of budget consumption
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub state: BudgetState,
    pub used: u64,
    pub limit: u64,
}

/// Tracks cumulative token usage against a configured ceiling.
///
/// # Example
///
/// ```
/// use icgl_domain::{BudgetState, BudgetTracker};
///
/// let budget = BudgetTracker::new(1000);
/// assert!(budget.check_usage(999));
/// assert!(!budget.check_usage(1000));
/// assert_eq!(budget.status(850).state, BudgetState::NearLimit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTracker {
    token_limit: u64,
}

impl Default for BudgetTracker {
    fn default() -> Self {
        Self {
            token_limit: DEFAULT_TOKEN_LIMIT,
        }
    }
}

impl BudgetTracker {
    /// Create a tracker with the given token ceiling
    pub fn new(token_limit: u64) -> Self {
        Self { token_limit }
    }

    /// The configured ceiling
    pub fn limit(&self) -> u64 {
        self.token_limit
    }

    /// True while the session is still under the ceiling
    pub fn check_usage(&self, used: u64) -> bool {
        used < self.token_limit
    }

    /// Detailed status snapshot for the given usage
    pub fn status(&self, used: u64) -> BudgetStatus {
        let state = if used >= self.token_limit {
            BudgetState::Exceeded
        } else if (used as f64) >= (self.token_limit as f64) * NEAR_LIMIT_RATIO {
            BudgetState::NearLimit
        } else {
            BudgetState::UnderBudget
        };

        BudgetStatus {
            state,
            used,
            limit: self.token_limit,
        }
    }
}
