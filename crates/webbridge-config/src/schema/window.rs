//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Host window appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window title. Pages may change it through `setWindowTitle`.
    pub title: String,
    /// Logical width in pixels (valid range: 320-7680).
    pub width: u32,
    /// Logical height in pixels (valid range: 240-4320).
    pub height: u32,
    /// Enable webview dev tools (always on in debug builds).
    pub devtools: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "WebBridge".into(),
            width: 1400,
            height: 900,
            devtools: cfg!(debug_assertions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_config_partial_toml() {
        let config: WindowConfig = toml::from_str("title = \"Demo\"\nwidth = 800").unwrap();
        assert_eq!(config.title, "Demo");
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 900);
    }
}
