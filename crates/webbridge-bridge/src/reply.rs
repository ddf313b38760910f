use serde_json::{json, Value};

/// The single answer to one bridge call.
///
/// Structured results cross the boundary pre-serialized as JSON text; plain
/// strings are used for single-scalar operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Text(String),
    Empty,
    /// The host answers later, once a user interaction completes. Nothing
    /// is sent for the call now.
    Pending,
}

impl Reply {
    /// `{"error": message}`
    pub fn error(message: impl std::fmt::Display) -> Self {
        Reply::Json(json!({ "error": message.to_string() }))
    }

    /// `{"success": false, "error": message}`
    pub fn failure(message: impl std::fmt::Display) -> Self {
        Reply::Json(json!({ "success": false, "error": message.to_string() }))
    }

    /// The string handed to the page's completion callback, `None` for
    /// fire-and-forget operations.
    pub fn into_wire(self) -> Option<String> {
        match self {
            Reply::Json(value) => Some(
                serde_json::to_string(&value)
                    .unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}")),
            ),
            Reply::Text(text) => Some(text),
            Reply::Empty | Reply::Pending => None,
        }
    }

    /// Borrow the JSON payload, if this reply carries one.
    pub fn json(&self) -> Option<&Value> {
        match self {
            Reply::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_shape() {
        let reply = Reply::error("bad");
        assert_eq!(reply.json().unwrap(), &json!({"error": "bad"}));
    }

    #[test]
    fn failure_shape() {
        let wire = Reply::failure("Record not found").into_wire().unwrap();
        let parsed: Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed, json!({"success": false, "error": "Record not found"}));
    }

    #[test]
    fn wire_forms() {
        assert_eq!(Reply::Text("hi".into()).into_wire().as_deref(), Some("hi"));
        assert_eq!(Reply::Empty.into_wire(), None);
        assert!(Reply::Empty.json().is_none());
        assert_eq!(Reply::Pending.into_wire(), None);
    }
}
