//! Resolution of the bridge's paths from CLI flags, config and platform
//! defaults, in that order of precedence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use webbridge_bridge::BridgeOptions;
use webbridge_config::WebBridgeConfig;

use crate::cli::Args;

/// Name of the bundled assets directory.
const ASSETS_DIR: &str = "assets";

/// Fallback record store name when no platform data dir is available.
const FALLBACK_DB: &str = "app_data.db";

/// Pick the assets directory: `--assets`, else `./assets`, else `assets`
/// next to the executable. Falls back to `./assets` even if it is missing;
/// the bundled page is then served from memory.
pub fn assets_dir(args: &Args) -> PathBuf {
    if let Some(dir) = &args.assets {
        return dir.clone();
    }
    let cwd = std::env::current_dir().unwrap_or_default().join(ASSETS_DIR);
    if cwd.is_dir() {
        return cwd;
    }
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join(ASSETS_DIR)));
    match beside_exe {
        Some(dir) if dir.is_dir() => dir,
        _ => cwd,
    }
}

/// Build the bridge's options. `default_db` is the platform database path,
/// if one could be determined.
pub fn bridge_options(
    args: &Args,
    config: &WebBridgeConfig,
    assets: &Path,
    default_db: Option<PathBuf>,
) -> BridgeOptions {
    let database_path = args
        .db
        .clone()
        .or_else(|| config.storage.database_path.clone())
        .or(default_db)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DB));

    let files_root = config
        .files
        .root
        .clone()
        .unwrap_or_else(|| assets.to_path_buf());

    BridgeOptions {
        database_path,
        files_root,
        max_file_size: config.files.max_file_size,
        quit_delay: Duration::from_millis(config.bridge.quit_delay_ms),
    }
}
