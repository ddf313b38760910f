//! IPC protocol between the page and the host.
//!
//! - **JS -> Rust**: `window.bridge.call(op, args)` posts
//!   `{"kind": op, "payload": {"_reqId": n, ...args}}` through
//!   `window.ipc.postMessage`, which reaches the WebView's `ipc_handler`.
//! - **Rust -> JS**: the host evaluates `window.bridge._dispatch(kind, payload)`.
//!   A `"response"` dispatch settles the promise for `_reqId`; any other kind
//!   is delivered to callbacks registered with `window.bridge.on(kind, cb)`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Dispatch kind used for call responses.
pub const RESPONSE_KIND: &str = "response";

/// A call posted by the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// Operation name.
    pub kind: String,
    /// Arguments object, including the `_reqId` correlation id.
    #[serde(default)]
    pub payload: Value,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// The `_reqId` the page is waiting on, if any.
    pub fn request_id(&self) -> Option<u64> {
        self.payload.get("_reqId").and_then(Value::as_u64)
    }
}

/// Payload of a `"response"` dispatch.
pub fn response_payload(req_id: u64, result: Option<String>) -> Value {
    json!({ "_reqId": req_id, "result": result })
}

/// JavaScript that sets up `window.bridge` on the page. Injected as an
/// initialization script so it exists before any page script runs.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    if (window.bridge) { return; }
    var pending = {};
    var nextId = 1;
    var handlers = {};
    window.bridge = {
        call: function(op, args) {
            var reqId = nextId++;
            var payload = Object.assign({}, args || {}, { _reqId: reqId });
            return new Promise(function(resolve) {
                pending[reqId] = resolve;
                window.ipc.postMessage(JSON.stringify({ kind: op, payload: payload }));
            });
        },
        on: function(kind, callback) {
            (handlers[kind] = handlers[kind] || []).push(callback);
        },
        _dispatch: function(kind, payload) {
            if (kind === 'response') {
                var resolve = pending[payload._reqId];
                if (resolve) {
                    delete pending[payload._reqId];
                    resolve(payload.result);
                }
                return;
            }
            (handlers[kind] || []).forEach(function(callback) {
                try { callback(payload); } catch (e) { console.error(e); }
            });
        }
    };
})();
"#;

/// Generate a JS snippet that dispatches a message to the page.
pub fn js_dispatch_message(kind: &str, payload: &Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.bridge._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_call_with_request_id() {
        let msg = IpcMessage::from_json(
            r#"{"kind":"saveData","payload":{"_reqId":7,"name":"a","value":"b"}}"#,
        )
        .unwrap();
        assert_eq!(msg.kind, "saveData");
        assert_eq!(msg.request_id(), Some(7));
        assert_eq!(msg.payload["name"], "a");
    }

    #[test]
    fn payload_defaults_to_null() {
        let msg = IpcMessage::from_json(r#"{"kind":"getVersion"}"#).unwrap();
        assert!(msg.payload.is_null());
        assert_eq!(msg.request_id(), None);
    }

    #[test]
    fn rejects_non_messages() {
        assert!(IpcMessage::from_json("not json").is_none());
        assert!(IpcMessage::from_json(r#"{"payload":{}}"#).is_none());
        assert!(IpcMessage::from_json("[1,2]").is_none());
    }

    #[test]
    fn dispatch_script_escapes_kind_and_payload() {
        let js = js_dispatch_message("messageToPage", &json!("it's \"quoted\""));
        assert_eq!(
            js,
            r#"window.bridge._dispatch("messageToPage", "it's \"quoted\"");"#
        );
    }

    #[test]
    fn response_payload_shape() {
        assert_eq!(
            response_payload(3, Some("ok".into())),
            json!({"_reqId": 3, "result": "ok"})
        );
        assert_eq!(
            response_payload(4, None),
            json!({"_reqId": 4, "result": null})
        );
    }

    #[test]
    fn init_script_defines_bridge_api() {
        assert!(IPC_INIT_SCRIPT.contains("window.bridge"));
        assert!(IPC_INIT_SCRIPT.contains("_reqId"));
        assert!(IPC_INIT_SCRIPT.contains("on: function"));
        assert!(IPC_INIT_SCRIPT.contains("'response'"));
    }
}
