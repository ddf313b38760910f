//! Payloads for `getSystemInfo`.

use serde_json::{json, Value};
use webbridge_store::{RecordStore, StoreError};

/// Which facet of the host to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemInfoKind {
    Basic,
    Database,
    Environment,
    Debug,
}

impl SystemInfoKind {
    pub fn parse(request_type: &str) -> Option<Self> {
        match request_type {
            "basic" => Some(Self::Basic),
            "database" => Some(Self::Database),
            "environment" => Some(Self::Environment),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

fn now() -> String {
    chrono::Local::now().to_rfc3339()
}

fn working_directory() -> String {
    std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

pub(crate) fn basic() -> Value {
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "platform": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "current_time": now(),
        "working_directory": working_directory(),
    })
}

pub(crate) fn database(store: &RecordStore) -> Result<Value, StoreError> {
    let counts = store.counts()?;
    Ok(json!({
        "database_path": store.path().display().to_string(),
        "user_records": counts.user_records,
        "log_records": counts.log_records,
        "database_size": store.file_size(),
    }))
}

pub(crate) fn environment() -> Value {
    json!({
        "os": std::env::consts::OS,
        "family": std::env::consts::FAMILY,
        "arch": std::env::consts::ARCH,
        "env_var_count": std::env::vars_os().count(),
        "current_time": now(),
        "working_directory": working_directory(),
    })
}

pub(crate) fn debug(stored_keys: usize) -> Value {
    let executable = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "executable": executable,
        "current_time": now(),
        "working_directory": working_directory(),
        "stored_keys": stored_keys,
        "registered_objects": ["bridge"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kinds() {
        assert_eq!(SystemInfoKind::parse("basic"), Some(SystemInfoKind::Basic));
        assert_eq!(
            SystemInfoKind::parse("database"),
            Some(SystemInfoKind::Database)
        );
        assert_eq!(
            SystemInfoKind::parse("environment"),
            Some(SystemInfoKind::Environment)
        );
        assert_eq!(SystemInfoKind::parse("debug"), Some(SystemInfoKind::Debug));
        assert_eq!(SystemInfoKind::parse("Basic"), None);
        assert_eq!(SystemInfoKind::parse("memory"), None);
    }

    #[test]
    fn basic_has_expected_fields() {
        let info = basic();
        for key in ["version", "platform", "arch", "current_time", "working_directory"] {
            assert!(info.get(key).is_some(), "missing {key}");
        }
        assert_eq!(info["platform"], std::env::consts::OS);
    }

    #[test]
    fn database_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("info.db")).unwrap();
        store.save("a", "1").unwrap();

        let info = database(&store).unwrap();
        assert_eq!(info["user_records"], 1);
        assert_eq!(info["log_records"], 1);
        assert!(info["database_size"].as_u64().unwrap() > 0);
    }

    #[test]
    fn debug_lists_bridge_object() {
        let info = debug(3);
        assert_eq!(info["stored_keys"], 3);
        assert_eq!(info["registered_objects"], json!(["bridge"]));
    }
}
