use serde::{Deserialize, Serialize};

/// Bridge behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Delay between `quitApplication` and process exit (valid range: 0-10000).
    pub quit_delay_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            quit_delay_ms: 1000,
        }
    }
}
