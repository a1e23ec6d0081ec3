//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`CrossTradeEngine`](crate::risk::CrossTradeEngine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Remove fully-filled entries from the index as soon as their remaining
    /// quantity reaches zero. Off by default: exhausted entries are harmless
    /// to detection either way, pruning only bounds index growth between
    /// session resets.
    #[serde(default = "default_prune_exhausted")]
    pub prune_exhausted: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prune_exhausted: default_prune_exhausted(),
        }
    }
}

const fn default_prune_exhausted() -> bool {
    false
}
