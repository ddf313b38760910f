//! Polling tick: webview events in, bridge events and transcript out,
//! and the quit deadline.

use std::time::Instant;

use tokio::sync::broadcast::error::TryRecvError;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use webbridge_common::BridgeEvent;
use webbridge_webview::{PageLoadState, WebViewEvent};

use super::core::WebBridgeApp;
use super::types::{POLL_INTERVAL, TRANSCRIPT_EVENT};

impl WebBridgeApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
            self.poll_file_picks();
            self.forward_bridge_events();
            self.forward_transcript();
        }

        if self.quit_due(now) {
            tracing::info!("Quit deadline reached");
            self.shutdown();
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_wake(now)));
    }

    /// Whether a scheduled quit has come due.
    pub(super) fn quit_due(&self, now: Instant) -> bool {
        self.quit_deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Next poll, or the quit deadline if that comes first.
    pub(super) fn next_wake(&self, now: Instant) -> Instant {
        let next_poll = now + POLL_INTERVAL;
        match self.quit_deadline {
            Some(deadline) => deadline.min(next_poll),
            None => next_poll,
        }
    }

    fn poll_webview_events(&mut self) {
        let events = match self.webviews {
            Some(ref manager) => manager.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                WebViewEvent::IpcMessage { body } => self.handle_ipc_message(&body),
                WebViewEvent::TitleChanged { title } => self.apply_title(&title),
                WebViewEvent::NavigationRequested { url } => {
                    if let Some(ref mut webview) = self.webview {
                        webview.set_url(url);
                    }
                }
                WebViewEvent::PageLoad {
                    state: PageLoadState::Finished,
                    url,
                } => {
                    tracing::info!(url = %url, "Page loaded");
                    self.transcript.push(&format!("[Page] loaded {url}"));
                }
                WebViewEvent::PageLoad { .. } => {}
            }
        }
    }

    /// Deliver host-initiated bridge events to the page.
    fn forward_bridge_events(&mut self) {
        loop {
            match self.bridge_events.try_recv() {
                Ok(event) => self.send_to_page(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Page fell behind on bridge events");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    fn forward_transcript(&mut self) {
        for line in self.transcript.take_pending() {
            let event = BridgeEvent::SystemEvent {
                event_type: TRANSCRIPT_EVENT.to_string(),
                data: line,
            };
            self.send_to_page(&event);
        }
    }

    fn send_to_page(&self, event: &BridgeEvent) {
        let Some(ref webview) = self.webview else {
            return;
        };
        if let Err(e) = webview.send_ipc(event.page_kind(), &event.page_payload()) {
            tracing::warn!(kind = event.page_kind(), error = %e, "Failed to deliver event");
        }
    }
}
