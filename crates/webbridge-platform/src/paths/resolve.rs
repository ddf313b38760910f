use std::path::PathBuf;

use webbridge_common::PlatformError;

pub(super) const APP_NAME: &str = "webbridge";

/// Returns the platform-specific configuration directory.
///
/// - macOS: `~/Library/Application Support/webbridge`
/// - Linux: `$XDG_CONFIG_HOME/webbridge` (defaults to `~/.config/webbridge`)
/// - Windows: `%APPDATA%\webbridge`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory.
///
/// - macOS: `~/Library/Application Support/webbridge`
/// - Linux: `$XDG_DATA_HOME/webbridge` (defaults to `~/.local/share/webbridge`)
/// - Windows: `%APPDATA%\webbridge`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the main configuration file.
pub fn config_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Returns the default path of the record store.
///
/// Located at `data_dir()/app_data.db`.
pub fn database_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("app_data.db"))
}

pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("logs"))
}
