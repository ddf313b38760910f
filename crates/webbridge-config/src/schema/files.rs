use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default upper bound for `readFile`: 5 MB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// File sandbox settings for `readFile` / `listFiles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Root directory pages may read from. `None` means the assets directory.
    pub root: Option<PathBuf>,
    /// Largest file `readFile` will return, in bytes (valid range: 1 B-100 MiB).
    pub max_file_size: u64,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}
