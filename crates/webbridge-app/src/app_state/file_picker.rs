//! `selectFile`: the native file dialog runs off the event loop and the
//! waiting call is answered on a later polling tick.

use std::path::PathBuf;

use serde_json::Value;

use webbridge_bridge::{file_selection_reply, Reply};
use webbridge_webview::ipc::response_payload;

use super::core::WebBridgeApp;
use super::types::PICKER_TITLE;

/// Outcome of one dialog, tagged with the call waiting on it.
#[derive(Debug)]
pub(super) struct FilePick {
    pub req_id: Option<u64>,
    pub path: Option<PathBuf>,
}

impl WebBridgeApp {
    /// Open the dialog for call `req_id` and return at once. Yields a
    /// response only when the dialog could not be started.
    pub(super) fn start_file_pick(&mut self, req_id: Option<u64>) -> Option<Value> {
        if let Err(e) = self.ensure_picker_runtime() {
            tracing::error!(error = %e, "Failed to create file picker runtime");
            return req_id.map(|id| response_payload(id, Reply::error(e).into_wire()));
        }
        let runtime = self.picker_runtime.as_ref()?;

        let mut dialog = rfd::AsyncFileDialog::new()
            .set_title(PICKER_TITLE)
            .add_filter("All files", &["*"])
            .add_filter("Text files", &["txt"])
            .add_filter("Image files", &["png", "jpg", "jpeg"]);
        if let Some(ref window) = self.window {
            dialog = dialog.set_parent(window.as_ref());
        }

        // Created here so the dialog is opened from the event loop thread.
        let selection = dialog.pick_file();
        let tx = self.picks_tx.clone();
        runtime.spawn(async move {
            let path = selection.await.map(|file| file.path().to_path_buf());
            if tx.send(FilePick { req_id, path }).is_err() {
                tracing::debug!("File picked after the app went away");
            }
        });

        tracing::debug!(req_id, "File picker opened");
        None
    }

    fn ensure_picker_runtime(&mut self) -> std::io::Result<()> {
        if self.picker_runtime.is_none() {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("file-picker")
                .enable_all()
                .build()?;
            self.picker_runtime = Some(runtime);
        }
        Ok(())
    }

    /// Record a finished dialog and build the response for its call.
    pub(super) fn finish_file_pick(&mut self, pick: FilePick) -> Option<Value> {
        match pick.path {
            Some(ref path) => self
                .transcript
                .push(&format!("[File] selected: {}", path.display())),
            None => self.transcript.push("[File] selection cancelled"),
        }
        let reply = file_selection_reply(pick.path.as_deref());
        pick.req_id.map(|id| response_payload(id, reply.into_wire()))
    }

    /// Answer every dialog that has closed since the last tick.
    pub(super) fn poll_file_picks(&mut self) {
        while let Ok(pick) = self.picks_rx.try_recv() {
            if let Some(response) = self.finish_file_pick(pick) {
                self.send_response(&response);
            }
        }
    }
}
