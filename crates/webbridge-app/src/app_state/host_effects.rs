//! `HostEffects` over the window state.
//!
//! Built from disjoint fields of `WebBridgeApp` so it can be handed to the
//! bridge while the bridge itself is borrowed.

use std::time::{Duration, Instant};

use webbridge_bridge::HostEffects;

use super::transcript::Transcript;

pub(super) struct WindowEffects<'a> {
    pub transcript: &'a mut Transcript,
    pub quit_deadline: &'a mut Option<Instant>,
    /// Title requested during this call; applied once the call returns.
    pub title: &'a mut Option<String>,
    pub file_pick: &'a mut bool,
}

impl HostEffects for WindowEffects<'_> {
    fn show_message(&mut self, title: &str, message: &str) {
        if let Err(e) = webbridge_platform::notify(title, message) {
            tracing::warn!(error = %e, "Failed to show message");
        }
    }

    fn append_transcript(&mut self, line: &str) {
        self.transcript.push(line);
    }

    fn set_window_title(&mut self, title: &str) {
        *self.title = Some(title.to_string());
    }

    fn schedule_quit(&mut self, delay: Duration) {
        *self.quit_deadline = Some(Instant::now() + delay);
    }

    fn pick_file(&mut self) {
        *self.file_pick = true;
    }
}
