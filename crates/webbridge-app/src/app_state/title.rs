//! Window title management. The page's document title and
//! `setWindowTitle` both set it; the most recent one wins.

use super::core::WebBridgeApp;

// =============================================================================
// WINDOW TITLE
// =============================================================================

impl WebBridgeApp {
    /// Record `title` and apply it to the window. Blank titles are ignored.
    pub(super) fn apply_title(&mut self, title: &str) {
        let title = title.trim();
        if title.is_empty() || title == self.title {
            return;
        }
        self.title = title.to_string();
        if let Some(ref window) = self.window {
            window.set_title(&self.title);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::app_state::core::test_app;

    #[test]
    fn apply_title_without_window_updates_state() {
        let (_dir, mut app) = test_app();
        app.apply_title("Renamed");
        assert_eq!(app.title, "Renamed");
    }

    #[test]
    fn blank_title_is_ignored() {
        let (_dir, mut app) = test_app();
        app.apply_title("   ");
        assert_eq!(app.title, "WebBridge");
    }
}
