//! Full configuration validation.
//!
//! Collects every range violation into a single `ConfigError`.

mod helpers;


use webbridge_common::ConfigError;

use crate::schema::WebBridgeConfig;
use helpers::{validate_range, validate_range_u64};

/// Largest allowed `files.max_file_size`: 100 MiB.
const MAX_FILE_SIZE_LIMIT: u64 = 100 * 1024 * 1024;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WebBridgeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(&mut errors, "window.width", config.window.width, 320, 7680);
    validate_range(&mut errors, "window.height", config.window.height, 240, 4320);
    if config.window.title.trim().is_empty() {
        errors.push("window.title must not be empty".into());
    }

    validate_range_u64(
        &mut errors,
        "files.max_file_size",
        config.files.max_file_size,
        1,
        MAX_FILE_SIZE_LIMIT,
    );
    validate_range_u64(
        &mut errors,
        "bridge.quit_delay_ms",
        config.bridge.quit_delay_ms,
        0,
        10_000,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
