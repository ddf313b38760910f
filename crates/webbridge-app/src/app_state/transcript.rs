//! Host-side record of bridge activity.
//!
//! Lines are logged as they arrive, kept in a bounded history and queued
//! for delivery to the page as `systemEvent` messages.

use std::collections::VecDeque;

pub(super) struct Transcript {
    lines: VecDeque<String>,
    /// Lines not yet forwarded to the page.
    pending: Vec<String>,
    capacity: usize,
}

impl Transcript {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            pending: Vec::new(),
            capacity,
        }
    }

    pub(super) fn push(&mut self, line: &str) {
        tracing::info!(target: "webbridge::transcript", "{line}");
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
        self.pending.push(line.to_string());
    }

    /// Take the lines queued since the last call.
    pub(super) fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    #[cfg(test)]
    pub(super) fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub(super) fn len(&self) -> usize {
        self.lines.len()
    }
}
