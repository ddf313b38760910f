//! WebBridgeApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use tokio::sync::broadcast;
use winit::window::Window;

use webbridge_bridge::Bridge;
use webbridge_common::BridgeEvent;
use webbridge_config::WebBridgeConfig;
use webbridge_webview::{WebViewHandle, WebViewManager};

use super::file_picker::FilePick;
use super::transcript::Transcript;
use super::types::TRANSCRIPT_CAPACITY;

/// Top-level application state.
pub struct WebBridgeApp {
    pub(super) config: WebBridgeConfig,
    pub(super) bridge: Bridge,
    pub(super) bridge_events: broadcast::Receiver<BridgeEvent>,
    pub(super) assets_dir: PathBuf,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) title: String,

    // The page
    pub(super) webviews: Option<WebViewManager>,
    pub(super) webview: Option<WebViewHandle>,

    pub(super) transcript: Transcript,

    // selectFile dialogs run on this runtime and report back over the channel
    pub(super) picker_runtime: Option<tokio::runtime::Runtime>,
    pub(super) picks_tx: mpsc::Sender<FilePick>,
    pub(super) picks_rx: mpsc::Receiver<FilePick>,

    // Set by quitApplication; the loop exits once it passes
    pub(super) quit_deadline: Option<Instant>,
    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl WebBridgeApp {
    pub fn new(config: WebBridgeConfig, bridge: Bridge, assets_dir: PathBuf) -> Self {
        let bridge_events = bridge.subscribe();
        let title = config.window.title.clone();
        let (picks_tx, picks_rx) = mpsc::channel();
        Self {
            config,
            bridge,
            bridge_events,
            assets_dir,
            window: None,
            title,
            webviews: None,
            webview: None,
            transcript: Transcript::new(TRANSCRIPT_CAPACITY),
            picker_runtime: None,
            picks_tx,
            picks_rx,
            quit_deadline: None,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}

/// App over a throwaway record store and files root, for tests.
#[cfg(test)]
pub(super) fn test_app() -> (tempfile::TempDir, WebBridgeApp) {
    use std::time::Duration;
    use webbridge_bridge::BridgeOptions;

    let dir = tempfile::tempdir().unwrap();
    let files_root = dir.path().join("files");
    std::fs::create_dir_all(&files_root).unwrap();
    std::fs::write(files_root.join("notes.txt"), "hello").unwrap();

    let bridge = Bridge::open(BridgeOptions {
        database_path: dir.path().join("app_data.db"),
        files_root: files_root.clone(),
        max_file_size: 1024,
        quit_delay: Duration::from_millis(1000),
    })
    .unwrap();

    let app = WebBridgeApp::new(WebBridgeConfig::default(), bridge, files_root);
    (dir, app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_without_window() {
        let (_dir, app) = test_app();
        assert!(app.window.is_none());
        assert!(app.webview.is_none());
        assert!(app.quit_deadline.is_none());
        assert!(app.picker_runtime.is_none());
        assert!(!app.should_exit);
        assert_eq!(app.title, "WebBridge");
    }
}
