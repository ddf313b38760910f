//! The closed set of bridge operations and their typed arguments.

use serde_json::Value;

use crate::error::CallError;

// =============================================================================
// OPERATION NAMES
// =============================================================================

/// Every operation a page may invoke. Wire names are exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    GetSystemInfo,
    SaveData,
    GetAllData,
    DeleteData,
    LogAction,
    StoreData,
    GetData,
    GetStoredData,
    ClearData,
    ReadFile,
    ListFiles,
    SelectFile,
    Calculate,
    ShowMessage,
    ShowNotification,
    LogMessage,
    EchoMessage,
    TestCallback,
    GetVersion,
    SetWindowTitle,
    QuitApplication,
}

impl OpKind {
    pub const ALL: &'static [OpKind] = &[
        OpKind::GetSystemInfo,
        OpKind::SaveData,
        OpKind::GetAllData,
        OpKind::DeleteData,
        OpKind::LogAction,
        OpKind::StoreData,
        OpKind::GetData,
        OpKind::GetStoredData,
        OpKind::ClearData,
        OpKind::ReadFile,
        OpKind::ListFiles,
        OpKind::SelectFile,
        OpKind::Calculate,
        OpKind::ShowMessage,
        OpKind::ShowNotification,
        OpKind::LogMessage,
        OpKind::EchoMessage,
        OpKind::TestCallback,
        OpKind::GetVersion,
        OpKind::SetWindowTitle,
        OpKind::QuitApplication,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OpKind::GetSystemInfo => "getSystemInfo",
            OpKind::SaveData => "saveData",
            OpKind::GetAllData => "getAllData",
            OpKind::DeleteData => "deleteData",
            OpKind::LogAction => "logAction",
            OpKind::StoreData => "storeData",
            OpKind::GetData => "getData",
            OpKind::GetStoredData => "getStoredData",
            OpKind::ClearData => "clearData",
            OpKind::ReadFile => "readFile",
            OpKind::ListFiles => "listFiles",
            OpKind::SelectFile => "selectFile",
            OpKind::Calculate => "calculate",
            OpKind::ShowMessage => "showMessage",
            OpKind::ShowNotification => "showNotification",
            OpKind::LogMessage => "logMessage",
            OpKind::EchoMessage => "echoMessage",
            OpKind::TestCallback => "testCallback",
            OpKind::GetVersion => "getVersion",
            OpKind::SetWindowTitle => "setWindowTitle",
            OpKind::QuitApplication => "quitApplication",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }
}

// =============================================================================
// TYPED CALLS
// =============================================================================

/// A validated bridge invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    GetSystemInfo { request_type: String },
    SaveData { name: String, value: String },
    GetAllData,
    DeleteData { id: i64 },
    LogAction { level: String, message: String },
    StoreData { key: String, value: String },
    GetData { key: String },
    GetStoredData,
    ClearData,
    ReadFile { path: String },
    ListFiles,
    SelectFile,
    Calculate { expression: String },
    ShowMessage { message: String },
    ShowNotification { message: String },
    LogMessage { level: String, message: String },
    EchoMessage { message: String },
    TestCallback { data: String },
    GetVersion,
    SetWindowTitle { title: String },
    QuitApplication,
}

impl BridgeCall {
    /// Build a typed call from an operation name and its JSON arguments
    /// object. Extra keys in `args` are ignored.
    pub fn parse(name: &str, args: &Value) -> Result<Self, CallError> {
        let op = OpKind::from_name(name).ok_or_else(|| CallError::UnknownOperation(name.into()))?;
        let args = Args(args);

        let call = match op {
            OpKind::GetSystemInfo => BridgeCall::GetSystemInfo {
                request_type: args.string("requestType")?,
            },
            OpKind::SaveData => BridgeCall::SaveData {
                name: args.string("name")?,
                value: args.string("value")?,
            },
            OpKind::GetAllData => BridgeCall::GetAllData,
            OpKind::DeleteData => BridgeCall::DeleteData {
                id: args.integer("id")?,
            },
            OpKind::LogAction => BridgeCall::LogAction {
                level: args.string("level")?,
                message: args.string("message")?,
            },
            OpKind::StoreData => BridgeCall::StoreData {
                key: args.string("key")?,
                value: args.string("value")?,
            },
            OpKind::GetData => BridgeCall::GetData {
                key: args.string("key")?,
            },
            OpKind::GetStoredData => BridgeCall::GetStoredData,
            OpKind::ClearData => BridgeCall::ClearData,
            OpKind::ReadFile => BridgeCall::ReadFile {
                path: args.string("path")?,
            },
            OpKind::ListFiles => BridgeCall::ListFiles,
            OpKind::SelectFile => BridgeCall::SelectFile,
            OpKind::Calculate => BridgeCall::Calculate {
                expression: args.string("expression")?,
            },
            OpKind::ShowMessage => BridgeCall::ShowMessage {
                message: args.string("message")?,
            },
            OpKind::ShowNotification => BridgeCall::ShowNotification {
                message: args.string("message")?,
            },
            OpKind::LogMessage => BridgeCall::LogMessage {
                level: args.string("level")?,
                message: args.string("message")?,
            },
            OpKind::EchoMessage => BridgeCall::EchoMessage {
                message: args.string("message")?,
            },
            OpKind::TestCallback => BridgeCall::TestCallback {
                data: args.string("data")?,
            },
            OpKind::GetVersion => BridgeCall::GetVersion,
            OpKind::SetWindowTitle => BridgeCall::SetWindowTitle {
                title: args.string("title")?,
            },
            OpKind::QuitApplication => BridgeCall::QuitApplication,
        };
        Ok(call)
    }

    pub fn kind(&self) -> OpKind {
        match self {
            BridgeCall::GetSystemInfo { .. } => OpKind::GetSystemInfo,
            BridgeCall::SaveData { .. } => OpKind::SaveData,
            BridgeCall::GetAllData => OpKind::GetAllData,
            BridgeCall::DeleteData { .. } => OpKind::DeleteData,
            BridgeCall::LogAction { .. } => OpKind::LogAction,
            BridgeCall::StoreData { .. } => OpKind::StoreData,
            BridgeCall::GetData { .. } => OpKind::GetData,
            BridgeCall::GetStoredData => OpKind::GetStoredData,
            BridgeCall::ClearData => OpKind::ClearData,
            BridgeCall::ReadFile { .. } => OpKind::ReadFile,
            BridgeCall::ListFiles => OpKind::ListFiles,
            BridgeCall::SelectFile => OpKind::SelectFile,
            BridgeCall::Calculate { .. } => OpKind::Calculate,
            BridgeCall::ShowMessage { .. } => OpKind::ShowMessage,
            BridgeCall::ShowNotification { .. } => OpKind::ShowNotification,
            BridgeCall::LogMessage { .. } => OpKind::LogMessage,
            BridgeCall::EchoMessage { .. } => OpKind::EchoMessage,
            BridgeCall::TestCallback { .. } => OpKind::TestCallback,
            BridgeCall::GetVersion => OpKind::GetVersion,
            BridgeCall::SetWindowTitle { .. } => OpKind::SetWindowTitle,
            BridgeCall::QuitApplication => OpKind::QuitApplication,
        }
    }
}

/// Typed accessors over a JSON arguments object.
struct Args<'a>(&'a Value);

impl Args<'_> {
    fn field(&self, name: &'static str) -> Result<&Value, CallError> {
        match self.0.get(name) {
            Some(Value::Null) | None => Err(CallError::MissingArgument(name)),
            Some(v) => Ok(v),
        }
    }

    fn string(&self, name: &'static str) -> Result<String, CallError> {
        self.field(name)?
            .as_str()
            .map(str::to_string)
            .ok_or(CallError::InvalidArgument {
                name,
                expected: "string",
            })
    }

    fn integer(&self, name: &'static str) -> Result<i64, CallError> {
        self.field(name)?.as_i64().ok_or(CallError::InvalidArgument {
            name,
            expected: "integer",
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_op_round_trips_through_its_name() {
        for op in OpKind::ALL {
            assert_eq!(OpKind::from_name(op.name()), Some(*op));
        }
        assert_eq!(OpKind::ALL.len(), 21);
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(OpKind::from_name("SaveData"), None);
        assert_eq!(OpKind::from_name("save_data"), None);
        assert_eq!(OpKind::from_name("saveData "), None);
        assert_eq!(OpKind::from_name(""), None);
    }

    #[test]
    fn unknown_operation_rejected() {
        let err = BridgeCall::parse("eval", &json!({})).unwrap_err();
        assert_eq!(err, CallError::UnknownOperation("eval".into()));
    }

    #[test]
    fn parse_save_data() {
        let call = BridgeCall::parse("saveData", &json!({"name": "n", "value": "v"})).unwrap();
        assert_eq!(
            call,
            BridgeCall::SaveData {
                name: "n".into(),
                value: "v".into()
            }
        );
        assert_eq!(call.kind(), OpKind::SaveData);
    }

    #[test]
    fn parse_ignores_extra_keys() {
        let call = BridgeCall::parse("getData", &json!({"key": "k", "_reqId": 7})).unwrap();
        assert_eq!(call, BridgeCall::GetData { key: "k".into() });
    }

    #[test]
    fn zero_argument_ops_accept_null_payload() {
        assert_eq!(
            BridgeCall::parse("getAllData", &Value::Null).unwrap(),
            BridgeCall::GetAllData
        );
        assert_eq!(
            BridgeCall::parse("quitApplication", &json!({"_reqId": 1})).unwrap(),
            BridgeCall::QuitApplication
        );
        let call = BridgeCall::parse("selectFile", &json!({"_reqId": 4})).unwrap();
        assert_eq!(call, BridgeCall::SelectFile);
        assert_eq!(call.kind(), OpKind::SelectFile);
    }

    #[test]
    fn missing_argument_reported_by_name() {
        let err = BridgeCall::parse("saveData", &json!({"name": "n"})).unwrap_err();
        assert_eq!(err, CallError::MissingArgument("value"));

        let err = BridgeCall::parse("readFile", &json!({"path": null})).unwrap_err();
        assert_eq!(err, CallError::MissingArgument("path"));
    }

    #[test]
    fn wrong_types_rejected() {
        let err = BridgeCall::parse("deleteData", &json!({"id": "3"})).unwrap_err();
        assert_eq!(
            err,
            CallError::InvalidArgument {
                name: "id",
                expected: "integer"
            }
        );

        let err = BridgeCall::parse("deleteData", &json!({"id": 1.5})).unwrap_err();
        assert!(matches!(err, CallError::InvalidArgument { name: "id", .. }));

        let err = BridgeCall::parse("setWindowTitle", &json!({"title": 42})).unwrap_err();
        assert!(matches!(err, CallError::InvalidArgument { name: "title", .. }));
    }

    #[test]
    fn system_info_uses_request_type() {
        let call = BridgeCall::parse("getSystemInfo", &json!({"requestType": "basic"})).unwrap();
        assert_eq!(
            call,
            BridgeCall::GetSystemInfo {
                request_type: "basic".into()
            }
        );
    }
}
