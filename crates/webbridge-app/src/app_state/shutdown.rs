//! Graceful shutdown: stop pending work and tear down the webview.

use super::core::WebBridgeApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl WebBridgeApp {
    /// Tear down the page before the window goes away. Safe to call twice.
    pub(super) fn shutdown(&mut self) {
        if self.should_exit {
            return;
        }
        tracing::info!(
            transcript_lines = self.transcript.len(),
            "Initiating graceful shutdown"
        );

        self.quit_deadline = None;

        // Abandon any open file dialog; its call goes unanswered
        if let Some(runtime) = self.picker_runtime.take() {
            runtime.shutdown_background();
        }

        if let Some(ref webview) = self.webview {
            tracing::debug!(url = webview.current_url(), "Closing page");
        }
        // Drop the webview before its manager and the parent window
        self.webview = None;
        self.webviews = None;

        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
