//! Window-side effects requested by bridge operations.

use std::time::Duration;

/// Implemented by the host window. The bridge calls these synchronously
/// while handling a call; none of them may block on the page.
pub trait HostEffects {
    /// Show a message to the user (dialog or native notification).
    fn show_message(&mut self, title: &str, message: &str);

    /// Append a line to the host-visible transcript of bridge activity.
    fn append_transcript(&mut self, line: &str);

    fn set_window_title(&mut self, title: &str);

    /// Exit the process once `delay` has elapsed.
    fn schedule_quit(&mut self, delay: Duration);

    /// Open a native file picker without waiting for it. The host answers
    /// the pending call itself with [`file_selection_reply`] once the user
    /// has chosen.
    ///
    /// [`file_selection_reply`]: crate::file_selection_reply
    fn pick_file(&mut self);
}

/// Host that records every effect, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub messages: Vec<(String, String)>,
    pub transcript: Vec<String>,
    pub titles: Vec<String>,
    pub quit_after: Option<Duration>,
    pub file_picks: usize,
}

#[cfg(test)]
impl HostEffects for RecordingHost {
    fn show_message(&mut self, title: &str, message: &str) {
        self.messages.push((title.to_string(), message.to_string()));
    }

    fn append_transcript(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn set_window_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn schedule_quit(&mut self, delay: Duration) {
        self.quit_after = Some(delay);
    }

    fn pick_file(&mut self) {
        self.file_picks += 1;
    }
}
