//! The canonical bridge object: owns the stores, the file sandbox and the
//! event bus, and answers every [`BridgeCall`].

mod file_handlers;
mod host_handlers;
mod map_handlers;
mod record_handlers;

pub use file_handlers::file_selection_reply;


use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::broadcast;
use webbridge_common::{BridgeEvent, EventBus};
use webbridge_store::{KvStore, RecordStore, StoreError};

use crate::host::HostEffects;
use crate::ops::BridgeCall;
use crate::reply::Reply;
use crate::sandbox::FileSandbox;

/// Capacity of the host-initiated event channel.
const EVENT_CAPACITY: usize = 64;

/// Where the bridge keeps its state and how it behaves.
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    pub database_path: PathBuf,
    pub files_root: PathBuf,
    pub max_file_size: u64,
    pub quit_delay: Duration,
}

pub struct Bridge {
    records: RecordStore,
    map: KvStore,
    sandbox: FileSandbox,
    events: EventBus,
    quit_delay: Duration,
}

impl Bridge {
    /// Open the record store (creating its schema if needed) and set up the
    /// sandbox and event bus.
    pub fn open(options: BridgeOptions) -> Result<Self, StoreError> {
        let records = RecordStore::open(&options.database_path)?;
        tracing::info!(
            db = %options.database_path.display(),
            files_root = %options.files_root.display(),
            "Bridge ready"
        );
        Ok(Self {
            records,
            map: KvStore::new(),
            sandbox: FileSandbox::new(options.files_root, options.max_file_size),
            events: EventBus::new(EVENT_CAPACITY),
            quit_delay: options.quit_delay,
        })
    }

    /// Receive host-initiated events (data changes, messages to the page).
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.events.subscribe()
    }

    /// Parse and run a call arriving from the page. Unknown operations and
    /// bad arguments become `{"error": ...}` replies.
    pub fn handle_message(&self, kind: &str, args: &Value, host: &mut dyn HostEffects) -> Reply {
        match BridgeCall::parse(kind, args) {
            Ok(call) => self.handle(call, host),
            Err(e) => {
                tracing::warn!(op = kind, error = %e, "Bridge call rejected");
                Reply::error(e)
            }
        }
    }

    /// Run one call. Every call produces exactly one reply; for
    /// [`Reply::Pending`] the host delivers it later.
    pub fn handle(&self, call: BridgeCall, host: &mut dyn HostEffects) -> Reply {
        tracing::debug!(op = call.kind().name(), "Bridge call");

        match call {
            BridgeCall::GetSystemInfo { request_type } => self.get_system_info(&request_type),
            BridgeCall::SaveData { name, value } => self.save_data(&name, &value),
            BridgeCall::GetAllData => self.get_all_data(),
            BridgeCall::DeleteData { id } => self.delete_data(id),
            BridgeCall::LogAction { level, message } => self.log_action(&level, &message),
            BridgeCall::StoreData { key, value } => self.store_data(&key, &value, host),
            BridgeCall::GetData { key } => self.get_data(&key),
            BridgeCall::GetStoredData => self.get_stored_data(),
            BridgeCall::ClearData => self.clear_data(host),
            BridgeCall::ReadFile { path } => self.read_file(&path, host),
            BridgeCall::ListFiles => self.list_files(),
            BridgeCall::SelectFile => self.select_file(host),
            BridgeCall::Calculate { expression } => self.calculate(&expression, host),
            BridgeCall::ShowMessage { message } => self.show_message(&message, host),
            BridgeCall::ShowNotification { message } => self.show_notification(&message, host),
            BridgeCall::LogMessage { level, message } => self.log_message(&level, &message, host),
            BridgeCall::EchoMessage { message } => self.echo_message(&message, host),
            BridgeCall::TestCallback { data } => self.test_callback(&data, host),
            BridgeCall::GetVersion => Reply::Text(version_string()),
            BridgeCall::SetWindowTitle { title } => self.set_window_title(&title, host),
            BridgeCall::QuitApplication => self.quit_application(host),
        }
    }

    fn publish(&self, event: BridgeEvent) {
        let receivers = self.events.publish(event);
        tracing::trace!(receivers, "Bridge event published");
    }
}

/// `WebBridge {version}`
pub(crate) fn version_string() -> String {
    format!("WebBridge {}", env!("CARGO_PKG_VERSION"))
}
