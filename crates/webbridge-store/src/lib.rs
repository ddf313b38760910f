//! Local persistence behind the bridge.
//!
//! - [`RecordStore`]: SQLite-backed `user_data` and `logs` tables that
//!   survive restarts. A connection is opened per call.
//! - [`KvStore`]: the in-memory key/value map, lost on exit.

pub mod error;
pub mod kv;
pub mod records;

pub use error::{StoreError, StoreResult};
pub use kv::{KvEntry, KvStore};
pub use records::{LogEntry, Record, RecordStore, StoreCounts};
