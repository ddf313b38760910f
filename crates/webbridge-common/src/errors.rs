use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("notification error: {0}")]
    NotificationError(String),
}

/// Startup failures of the host. Once the event loop runs, errors are
/// logged and the host keeps going.
#[derive(Debug, thiserror::Error)]
pub enum WebBridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("record store unavailable: {0}")]
    Storage(String),

    #[error("window system error: {0}")]
    Window(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_name_the_problem() {
        let err = ConfigError::FileNotFound(PathBuf::from("/etc/webbridge.toml"));
        assert_eq!(err.to_string(), "config file not found: /etc/webbridge.toml");

        let err = ConfigError::ValidationError("bridge.quit_delay_ms out of range".into());
        assert!(err.to_string().ends_with("bridge.quit_delay_ms out of range"));
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::PathError("no home directory".into());
        assert_eq!(err.to_string(), "path error: no home directory");
    }

    #[test]
    fn wraps_config_and_platform_errors() {
        let err: WebBridgeError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, WebBridgeError::Config(_)));
        assert_eq!(err.to_string(), "config parse error: bad toml");

        let err: WebBridgeError = PlatformError::NotificationError("osascript".into()).into();
        assert!(matches!(err, WebBridgeError::Platform(_)));
    }

    #[test]
    fn startup_failures_display() {
        let err = WebBridgeError::Storage("unable to open database file".into());
        assert_eq!(
            err.to_string(),
            "record store unavailable: unable to open database file"
        );

        let err = WebBridgeError::Window("no display".into());
        assert_eq!(err.to_string(), "window system error: no display");
    }
}
