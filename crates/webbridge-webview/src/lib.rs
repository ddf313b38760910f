//! WebView host for the bridge page.
//!
//! Wraps the `wry` crate to provide:
//! - A managed WebView filling the host window
//! - Request/response IPC between the page and the bridge
//! - A `webbridge://` custom protocol for bundled assets
//! - A navigation allowlist

pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;

pub use content::ContentProvider;
pub use events::{PageLoadState, WebViewEvent};
pub use ipc::IpcMessage;
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
