//! Internal constants for the app state module.

use std::time::Duration;

/// How often to poll for webview and bridge events (approx 120 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Lines of bridge activity kept in memory.
pub(super) const TRANSCRIPT_CAPACITY: usize = 500;

/// Title of the `selectFile` dialog.
pub(super) const PICKER_TITLE: &str = "Select file";

/// `systemEvent` type carrying transcript lines to the page.
pub(super) const TRANSCRIPT_EVENT: &str = "transcript";
