const BLANK_URL: &str = "about:blank";

/// Configuration for creating the WebView.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load. `about:blank` when unset.
    pub url: Option<String>,
    /// Whether to enable dev tools.
    pub devtools: bool,
    pub user_agent: Option<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("WebBridge/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl WebViewConfig {
    /// Create a config that loads a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub(crate) fn initial_url(&self) -> &str {
        self.url.as_deref().unwrap_or(BLANK_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_url_defaults_to_blank() {
        assert_eq!(WebViewConfig::default().initial_url(), "about:blank");
        let cfg = WebViewConfig::with_url("webbridge://localhost/index.html");
        assert_eq!(cfg.initial_url(), "webbridge://localhost/index.html");
    }

    #[test]
    fn default_user_agent_names_app() {
        let cfg = WebViewConfig::default();
        assert!(cfg.user_agent.unwrap().starts_with("WebBridge/"));
    }
}
