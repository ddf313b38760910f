//! In-memory key/value operations.

use serde_json::json;
use webbridge_common::BridgeEvent;

use super::Bridge;
use crate::host::HostEffects;
use crate::reply::Reply;

impl Bridge {
    pub(super) fn store_data(&self, key: &str, value: &str, host: &mut dyn HostEffects) -> Reply {
        match self.map.store(key, value) {
            Ok(snapshot) => {
                host.append_transcript(&format!("[Data] {key} = {value}"));
                match serde_json::to_value(&snapshot) {
                    Ok(data) => self.publish(BridgeEvent::DataUpdated(data)),
                    Err(e) => tracing::warn!(error = %e, "storeData: snapshot not serializable"),
                }
            }
            Err(e) => tracing::error!(key, error = %e, "storeData failed"),
        }
        Reply::Empty
    }

    pub(super) fn get_data(&self, key: &str) -> Reply {
        match self.map.get(key) {
            Ok(Some(entry)) => match serde_json::to_value(entry) {
                Ok(value) => Reply::Json(value),
                Err(e) => Reply::error(e),
            },
            Ok(None) => Reply::error(format!("Data key '{key}' does not exist")),
            Err(e) => Reply::error(e),
        }
    }

    pub(super) fn get_stored_data(&self) -> Reply {
        match self.map.snapshot() {
            Ok(snapshot) => match serde_json::to_value(snapshot) {
                Ok(value) => Reply::Json(value),
                Err(e) => Reply::error(e),
            },
            Err(e) => Reply::error(e),
        }
    }

    /// Empties the map and bulk-clears the record store. Id sequences keep
    /// counting from where they were.
    pub(super) fn clear_data(&self, host: &mut dyn HostEffects) -> Reply {
        if let Err(e) = self.map.clear() {
            tracing::error!(error = %e, "clearData: map clear failed");
        }
        if let Err(e) = self.records.clear() {
            tracing::error!(error = %e, "clearData: record store clear failed");
        }
        host.append_transcript("[Data] all data cleared");
        self.publish(BridgeEvent::DataUpdated(json!({})));
        Reply::Empty
    }
}
