//! WebView event types.

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the WebView, drained by the host's polling tick.
#[derive(Debug, Clone)]
pub enum WebViewEvent {
    PageLoad { state: PageLoadState, url: String },
    /// Document title changed.
    TitleChanged { title: String },
    /// Raw JSON body posted by `window.ipc.postMessage`.
    IpcMessage { body: String },
    /// An allowed navigation. Blocked navigations never produce an event.
    NavigationRequested { url: String },
}
