use tracing::info;
use webbridge_common::PlatformError;

/// Sends a native notification to the user.
///
/// - macOS: Uses `osascript` to display a native notification.
/// - Other platforms: Goes through the desktop notification service
///   (D-Bus on Linux and the BSDs, toast notifications on Windows).
pub fn notify(title: &str, body: &str) -> Result<(), PlatformError> {
    platform_notify(title, body)
}

/// Escape a string for embedding inside an AppleScript string literal.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(target_os = "macos")]
fn platform_notify(title: &str, body: &str) -> Result<(), PlatformError> {
    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(body),
        escape_applescript(title)
    );

    let output = std::process::Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .output()
        .map_err(|e| PlatformError::NotificationError(format!("failed to run osascript: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PlatformError::NotificationError(format!(
            "osascript failed: {stderr}"
        )));
    }

    info!("native notification sent");
    Ok(())
}

#[cfg(not(target_os = "macos"))]
const APP_NAME: &str = "WebBridge";

#[cfg(not(target_os = "macos"))]
fn build_notification(title: &str, body: &str) -> notify_rust::Notification {
    let mut notification = notify_rust::Notification::new();
    notification.appname(APP_NAME).summary(title).body(body);
    notification
}

#[cfg(not(target_os = "macos"))]
fn platform_notify(title: &str, body: &str) -> Result<(), PlatformError> {
    build_notification(title, body)
        .show()
        .map_err(|e| PlatformError::NotificationError(format!("notification service: {e}")))?;

    info!(title, body_len = body.len(), "native notification sent");
    Ok(())
}
