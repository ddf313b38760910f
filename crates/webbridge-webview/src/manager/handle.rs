use wry::WebView;

/// Handle to the managed WebView.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    /// Current URL (best-effort tracking).
    pub(super) current_url: String,
}

impl WebViewHandle {
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Record an allowed navigation.
    pub fn set_url(&mut self, url: String) {
        self.current_url = url;
    }

    /// Dispatch `kind` with `payload` to the page's `window.bridge`.
    pub fn send_ipc(&self, kind: &str, payload: &serde_json::Value) -> Result<(), wry::Error> {
        let script = crate::ipc::js_dispatch_message(kind, payload);
        self.webview.evaluate_script(&script)
    }

    /// Set the WebView bounds within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }
}
