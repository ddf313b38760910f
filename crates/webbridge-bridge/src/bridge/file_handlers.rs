//! Sandboxed file reads, the file picker and the calculator.

use std::path::Path;

use serde_json::json;

use super::Bridge;
use crate::calc;
use crate::error::FileError;
use crate::host::HostEffects;
use crate::reply::Reply;

impl Bridge {
    pub(super) fn read_file(&self, path: &str, host: &mut dyn HostEffects) -> Reply {
        match self.sandbox.read(path) {
            Ok(file) => {
                host.append_transcript(&format!("[File] {path} ({} chars)", file.size));
                Reply::Json(json!({
                    "success": true,
                    "file_path": file.file_path,
                    "content": file.content,
                    "size": file.size,
                }))
            }
            Err(e) => {
                if matches!(e, FileError::OutsideRoot) {
                    tracing::warn!(path, "readFile blocked: path outside file root");
                } else {
                    tracing::debug!(path, error = %e, "readFile failed");
                }
                Reply::Json(json!({
                    "success": false,
                    "file_path": path,
                    "error": e.to_string(),
                }))
            }
        }
    }

    pub(super) fn list_files(&self) -> Reply {
        match self.sandbox.list() {
            Ok(files) => {
                let count = files.len();
                Reply::Json(json!({
                    "success": true,
                    "directory": self.sandbox.root().display().to_string(),
                    "files": files,
                    "count": count,
                }))
            }
            Err(e) => {
                tracing::warn!(error = %e, "listFiles failed");
                Reply::failure(e)
            }
        }
    }

    /// The picker runs on the host; the call stays open until the host
    /// answers it with [`file_selection_reply`].
    pub(super) fn select_file(&self, host: &mut dyn HostEffects) -> Reply {
        host.pick_file();
        Reply::Pending
    }

    pub(super) fn calculate(&self, expression: &str, host: &mut dyn HostEffects) -> Reply {
        match calc::evaluate(expression) {
            Ok(value) => {
                host.append_transcript(&format!("[Calc] {expression} = {value}"));
                Reply::Json(json!({
                    "success": true,
                    "expression": expression,
                    "result": value.to_json(),
                    "type": value.type_name(),
                }))
            }
            Err(e) => {
                tracing::debug!(expression, error = %e, "calculate rejected");
                Reply::Json(json!({
                    "success": false,
                    "expression": expression,
                    "error": e.to_string(),
                }))
            }
        }
    }
}

/// Answer for a finished `selectFile`: `{path, name, size, exists}` for a
/// chosen file, `{cancelled: true}` when the picker was dismissed.
pub fn file_selection_reply(selected: Option<&Path>) -> Reply {
    let Some(path) = selected else {
        return Reply::Json(json!({ "cancelled": true }));
    };
    match std::fs::metadata(path) {
        Ok(metadata) => Reply::Json(json!({
            "path": path.display().to_string(),
            "name": path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            "size": metadata.len(),
            "exists": true,
        })),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "selectFile: chosen file unreadable");
            Reply::error(e)
        }
    }
}
