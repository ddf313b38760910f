//! Operations whose only effect is on the host window.

use webbridge_common::BridgeEvent;

use super::Bridge;
use crate::host::HostEffects;
use crate::reply::Reply;

/// Title of the dialog shown by `showMessage` / `showNotification`.
const MESSAGE_TITLE: &str = "Message from page";

impl Bridge {
    pub(super) fn show_message(&self, message: &str, host: &mut dyn HostEffects) -> Reply {
        host.show_message(MESSAGE_TITLE, message);
        host.append_transcript(&format!("[Message] {message}"));
        Reply::Empty
    }

    pub(super) fn show_notification(&self, message: &str, host: &mut dyn HostEffects) -> Reply {
        host.show_message(MESSAGE_TITLE, message);
        host.append_transcript(&format!("[Notification] {message}"));
        Reply::Empty
    }

    pub(super) fn log_message(
        &self,
        level: &str,
        message: &str,
        host: &mut dyn HostEffects,
    ) -> Reply {
        let level = level.to_uppercase();
        let time = chrono::Local::now().format("%H:%M:%S");
        host.append_transcript(&format!("[{time}] [{level}] {message}"));
        match level.as_str() {
            "ERROR" => tracing::error!(source = "page", "{message}"),
            "WARN" | "WARNING" => tracing::warn!(source = "page", "{message}"),
            "DEBUG" => tracing::debug!(source = "page", "{message}"),
            _ => tracing::info!(source = "page", "{message}"),
        }
        Reply::Empty
    }

    pub(super) fn echo_message(&self, message: &str, host: &mut dyn HostEffects) -> Reply {
        let processed = format!(
            "Processed: '{message}' (length: {} chars)",
            message.chars().count()
        );
        host.append_transcript(&format!("[Echo] input: {message}"));
        host.append_transcript(&format!("[Echo] output: {processed}"));
        Reply::Text(processed)
    }

    pub(super) fn test_callback(&self, data: &str, host: &mut dyn HostEffects) -> Reply {
        host.append_transcript(&format!("[Test] received: {data}"));
        self.publish(BridgeEvent::MessageToPage(format!(
            "Host received test data: {data}"
        )));
        Reply::Empty
    }

    pub(super) fn set_window_title(&self, title: &str, host: &mut dyn HostEffects) -> Reply {
        host.set_window_title(title);
        host.append_transcript(&format!("[Window] title changed to: {title}"));
        Reply::Empty
    }

    pub(super) fn quit_application(&self, host: &mut dyn HostEffects) -> Reply {
        tracing::info!(delay_ms = self.quit_delay.as_millis() as u64, "Quit requested by page");
        host.append_transcript("[App] quitting");
        host.schedule_quit(self.quit_delay);
        Reply::Empty
    }
}
