/// The commented config written on first run.
pub(super) fn default_config_toml() -> &'static str {
    r#"# WebBridge Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "WebBridge"
# width = 1400           # 320-7680
# height = 900           # 240-4320
# devtools = false

[storage]
# database_path = "/path/to/app_data.db"   # default: <data dir>/webbridge/app_data.db

[files]
# root = "/path/to/shared/files"           # default: the bundled assets directory
# max_file_size = 5242880                  # bytes, 1-104857600

[bridge]
# quit_delay_ms = 1000   # 0-10000

[logging]
# level = "info"         # trace, debug, info, warn, error
"#
}
