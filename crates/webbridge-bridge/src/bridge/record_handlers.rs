//! Persisted record operations and `getSystemInfo`.

use serde_json::json;

use super::Bridge;
use crate::reply::Reply;
use crate::sysinfo::{self, SystemInfoKind};

impl Bridge {
    pub(super) fn get_system_info(&self, request_type: &str) -> Reply {
        let Some(kind) = SystemInfoKind::parse(request_type) else {
            return Reply::error("Unknown request type");
        };
        match kind {
            SystemInfoKind::Basic => Reply::Json(sysinfo::basic()),
            SystemInfoKind::Environment => Reply::Json(sysinfo::environment()),
            SystemInfoKind::Debug => match self.map.len() {
                Ok(stored_keys) => Reply::Json(sysinfo::debug(stored_keys)),
                Err(e) => {
                    tracing::error!(error = %e, "getSystemInfo: key/value map unavailable");
                    Reply::error(e)
                }
            },
            SystemInfoKind::Database => match sysinfo::database(&self.records) {
                Ok(info) => Reply::Json(info),
                Err(e) => {
                    tracing::error!(error = %e, "getSystemInfo: database query failed");
                    Reply::error(e)
                }
            },
        }
    }

    pub(super) fn save_data(&self, name: &str, value: &str) -> Reply {
        match self.records.save(name, value) {
            Ok(id) => {
                tracing::info!(id, name, "Record saved");
                Reply::Json(json!({ "success": true, "id": id }))
            }
            Err(e) => {
                tracing::error!(name, error = %e, "saveData failed");
                Reply::failure(e)
            }
        }
    }

    pub(super) fn get_all_data(&self) -> Reply {
        match self.records.all() {
            Ok(records) => match serde_json::to_value(records) {
                Ok(value) => Reply::Json(value),
                Err(e) => Reply::error(e),
            },
            Err(e) => {
                tracing::error!(error = %e, "getAllData failed");
                Reply::error(e)
            }
        }
    }

    pub(super) fn delete_data(&self, id: i64) -> Reply {
        match self.records.delete(id) {
            Ok(true) => {
                tracing::info!(id, "Record deleted");
                Reply::Json(json!({ "success": true }))
            }
            Ok(false) => Reply::failure("Record not found"),
            Err(e) => {
                tracing::error!(id, error = %e, "deleteData failed");
                Reply::failure(e)
            }
        }
    }

    /// Fire-and-forget: a store failure is logged and swallowed.
    pub(super) fn log_action(&self, level: &str, message: &str) -> Reply {
        if let Err(e) = self.records.log(level, message) {
            tracing::error!(level, error = %e, "logAction failed");
        }
        Reply::Empty
    }
}
