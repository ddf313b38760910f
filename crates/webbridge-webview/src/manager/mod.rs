//! WebView lifecycle management.
//!
//! `WebViewManager` builds the `wry::WebView` that hosts the bridge page
//! and collects its events for the host's event loop.

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

/// Custom protocol scheme serving bundled assets.
pub const PROTOCOL: &str = "webbridge";

/// URL of the bundled start page.
pub const START_URL: &str = "webbridge://localhost/index.html";

pub struct WebViewManager {
    /// Event sink; handlers push here, the main loop drains.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    content_provider: Option<Arc<ContentProvider>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            content_provider: None,
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}
