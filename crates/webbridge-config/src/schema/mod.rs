//! Configuration schema types for WebBridge.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod files;
mod logging;
mod storage;
mod window;

pub use bridge::*;
pub use files::*;
pub use logging::*;
pub use storage::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct WebBridgeConfig {
    pub window: WindowConfig,
    pub storage: StorageConfig,
    pub files: FilesConfig,
    pub bridge: BridgeConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: WebBridgeConfig = toml::from_str("").unwrap();
        assert_eq!(config.window.title, "WebBridge");
        assert_eq!(config.window.width, 1400);
        assert_eq!(config.window.height, 900);
        assert!(config.storage.database_path.is_none());
        assert!(config.files.root.is_none());
        assert_eq!(config.files.max_file_size, 5 * 1024 * 1024);
        assert_eq!(config.bridge.quit_delay_ms, 1000);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let toml_str = r#"
[storage]
database_path = "/tmp/demo.db"

[bridge]
quit_delay_ms = 250
"#;
        let config: WebBridgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.storage.database_path.as_deref(),
            Some(std::path::Path::new("/tmp/demo.db"))
        );
        assert_eq!(config.bridge.quit_delay_ms, 250);
        assert_eq!(config.window.title, "WebBridge");
    }
}
