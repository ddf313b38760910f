use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Record store location.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file. `None` means `data_dir()/app_data.db`.
    pub database_path: Option<PathBuf>,
}
