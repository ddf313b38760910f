//! IPC message validation and dispatch from the page to the bridge.

use serde_json::Value;

use webbridge_bridge::Reply;
use webbridge_webview::ipc::{response_payload, RESPONSE_KIND};
use webbridge_webview::IpcMessage;

use super::core::WebBridgeApp;
use super::host_effects::WindowEffects;

// =============================================================================
// DISPATCH
// =============================================================================

impl WebBridgeApp {
    /// Handle one raw IPC message from the webview and answer it.
    pub(super) fn handle_ipc_message(&mut self, body: &str) {
        let Some(msg) = IpcMessage::from_json(body) else {
            tracing::warn!(body_len = body.len(), "IPC message rejected: failed to parse");
            return;
        };

        if let Some(response) = self.dispatch_call(&msg) {
            self.send_response(&response);
        }
    }

    /// Deliver a `response` dispatch to the page.
    pub(super) fn send_response(&self, response: &Value) {
        let Some(ref webview) = self.webview else {
            tracing::warn!(req_id = %response["_reqId"], "No webview to answer call");
            return;
        };
        if let Err(e) = webview.send_ipc(RESPONSE_KIND, response) {
            tracing::warn!(req_id = %response["_reqId"], error = %e, "Failed to send response");
        }
    }

    /// Run `msg` through the bridge. Returns the response payload when the
    /// page is waiting on one (the message carried a `_reqId`).
    pub(super) fn dispatch_call(&mut self, msg: &IpcMessage) -> Option<Value> {
        let req_id = msg.request_id();
        tracing::debug!(op = %msg.kind, req_id, "IPC call dispatched");

        let mut requested_title = None;
        let mut file_pick = false;
        let reply = {
            let mut host = WindowEffects {
                transcript: &mut self.transcript,
                quit_deadline: &mut self.quit_deadline,
                title: &mut requested_title,
                file_pick: &mut file_pick,
            };
            self.bridge.handle_message(&msg.kind, &msg.payload, &mut host)
        };

        if let Some(title) = requested_title {
            self.apply_title(&title);
        }

        if matches!(reply, Reply::Pending) {
            // Answered from the polling tick once the dialog closes
            return if file_pick {
                self.start_file_pick(req_id)
            } else {
                None
            };
        }

        req_id.map(|id| response_payload(id, reply.into_wire()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::app_state::core::test_app;
    use webbridge_webview::IpcMessage;

    fn message(raw: &str) -> IpcMessage {
        IpcMessage::from_json(raw).unwrap()
    }

    #[test]
    fn call_with_request_id_gets_one_response() {
        let (_dir, mut app) = test_app();
        let response = app
            .dispatch_call(&message(
                r#"{"kind":"echoMessage","payload":{"_reqId":5,"message":"hi"}}"#,
            ))
            .unwrap();
        assert_eq!(
            response,
            json!({"_reqId": 5, "result": "Processed: 'hi' (length: 2 chars)"})
        );
    }

    #[test]
    fn structured_reply_is_json_text() {
        let (_dir, mut app) = test_app();
        let response = app
            .dispatch_call(&message(
                r#"{"kind":"saveData","payload":{"_reqId":1,"name":"a","value":"b"}}"#,
            ))
            .unwrap();
        let result: serde_json::Value =
            serde_json::from_str(response["result"].as_str().unwrap()).unwrap();
        assert_eq!(result["success"], true);
        assert!(result["id"].is_i64());
    }

    #[test]
    fn fire_and_forget_call_answers_with_null() {
        let (_dir, mut app) = test_app();
        let response = app
            .dispatch_call(&message(
                r#"{"kind":"storeData","payload":{"_reqId":2,"key":"k","value":"v"}}"#,
            ))
            .unwrap();
        assert_eq!(response, json!({"_reqId": 2, "result": null}));
        assert_eq!(app.transcript.take_pending(), vec!["[Data] k = v"]);
    }

    #[test]
    fn call_without_request_id_gets_no_response() {
        let (_dir, mut app) = test_app();
        let response = app.dispatch_call(&message(r#"{"kind":"getVersion"}"#));
        assert!(response.is_none());
    }

    #[test]
    fn unknown_operation_is_answered_with_error() {
        let (_dir, mut app) = test_app();
        let response = app
            .dispatch_call(&message(r#"{"kind":"rm","payload":{"_reqId":9}}"#))
            .unwrap();
        let result: serde_json::Value =
            serde_json::from_str(response["result"].as_str().unwrap()).unwrap();
        assert_eq!(result["error"], "Unknown operation: rm");
    }

    #[test]
    fn set_window_title_updates_title() {
        let (_dir, mut app) = test_app();
        app.dispatch_call(&message(
            r#"{"kind":"setWindowTitle","payload":{"title":"From page"}}"#,
        ));
        assert_eq!(app.title, "From page");
    }

    #[test]
    fn quit_application_sets_deadline() {
        let (_dir, mut app) = test_app();
        app.dispatch_call(&message(r#"{"kind":"quitApplication","payload":{}}"#));
        assert!(app.quit_deadline.is_some());
    }

    #[test]
    fn unparseable_body_is_dropped() {
        let (_dir, mut app) = test_app();
        app.handle_ipc_message("not json");
        assert_eq!(app.transcript.len(), 0);
    }
}
