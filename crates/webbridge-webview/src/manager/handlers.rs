use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Allowed URL prefixes for webview navigation. Everything else is blocked.
/// - `webbridge://` serves the bundled page
/// - `about:blank` is the default empty page
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "webbridge://",
    // WebView2 rewrites custom protocols: webbridge://localhost/… → http://webbridge.localhost/…
    "http://webbridge.localhost/",
    "about:blank",
];

/// Check whether a URL is allowed by the navigation allowlist.
pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

fn push(events: &Arc<Mutex<Vec<WebViewEvent>>>, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
                return;
            }

            debug!(body_len = body.len(), "IPC message from JS");
            push(&events, WebViewEvent::IpcMessage { body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            push(&events, WebViewEvent::PageLoad { state, url });
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(title = %title, "title changed");
            push(&events, WebViewEvent::TitleChanged { title });
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !is_navigation_allowed(&url) {
                warn!(url = %url, "navigation blocked: URL not in allowlist");
                return false;
            }
            push(&events, WebViewEvent::NavigationRequested { url });
            true
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_bundled_protocol() {
        assert!(is_navigation_allowed("webbridge://localhost/index.html"));
        assert!(is_navigation_allowed("webbridge://localhost/static/example.txt"));
    }

    #[test]
    fn allows_webview2_rewritten_custom_protocol() {
        assert!(is_navigation_allowed("http://webbridge.localhost/index.html"));
    }

    #[test]
    fn allows_about_blank() {
        assert!(is_navigation_allowed("about:blank"));
    }

    #[test]
    fn blocks_remote_origins() {
        assert!(!is_navigation_allowed("https://evil.com"));
        assert!(!is_navigation_allowed("http://localhost:8080"));
        assert!(!is_navigation_allowed("http://webbridge.localhost.evil.com/"));
    }

    #[test]
    fn blocks_file_javascript_and_data() {
        assert!(!is_navigation_allowed("file:///etc/passwd"));
        assert!(!is_navigation_allowed("javascript:alert(1)"));
        assert!(!is_navigation_allowed("data:text/html,<h1>XSS</h1>"));
    }

    #[test]
    fn blocks_empty_and_garbage() {
        assert!(!is_navigation_allowed(""));
        assert!(!is_navigation_allowed("   "));
        assert!(!is_navigation_allowed("webbridge"));
    }
}
