//! Window creation and webview setup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use webbridge_webview::manager::START_URL;
use webbridge_webview::{ContentProvider, WebViewConfig, WebViewManager};

use super::bounds::full_window;
use super::core::WebBridgeApp;

// =============================================================================
// CONSTANTS
// =============================================================================

const INDEX_PAGE: &str = "index.html";

/// Page compiled into the binary, served when the assets directory has none.
const BUNDLED_INDEX: &str = include_str!("../../../../assets/index.html");

// =============================================================================
// INITIALIZATION
// =============================================================================

impl WebBridgeApp {
    /// Create the window and the webview inside it.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        if !self.initialize_webview(&window) {
            return false;
        }

        self.window = Some(window);
        tracing::info!("Window created and webview loaded");
        true
    }

    /// Set up the `webbridge://` content provider and load the start page.
    fn initialize_webview(&mut self, window: &Window) -> bool {
        let mut content_provider = ContentProvider::new(&self.assets_dir);
        if !self.assets_dir.join(INDEX_PAGE).is_file() {
            tracing::warn!(
                path = %self.assets_dir.display(),
                "No index.html in assets directory, serving the built-in page"
            );
            content_provider.add_override(INDEX_PAGE, "text/html", BUNDLED_INDEX);
        }

        let mut manager = WebViewManager::new();
        manager.set_content_provider(content_provider);

        let config = WebViewConfig {
            devtools: self.config.window.devtools,
            ..WebViewConfig::with_url(START_URL)
        };

        match manager.create(window, full_window(window.inner_size()), config) {
            Ok(handle) => {
                tracing::info!(
                    url = START_URL,
                    assets_dir = %self.assets_dir.display(),
                    "WebView created"
                );
                self.webview = Some(handle);
                self.webviews = Some(manager);
                true
            }
            Err(e) => {
                tracing::error!("Failed to create webview: {e}");
                false
            }
        }
    }

    /// Fit the webview to the window after a resize.
    pub(super) fn sync_webview_bounds(&self) {
        let (Some(window), Some(webview)) = (&self.window, &self.webview) else {
            return;
        };
        if let Err(e) = webview.set_bounds(full_window(window.inner_size())) {
            tracing::warn!(error = %e, "Failed to resize webview");
        }
    }
}
