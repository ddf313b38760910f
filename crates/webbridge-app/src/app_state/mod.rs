//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the webview hosting the page and the bridge
//! answering the page's calls.

mod bounds;
mod core;
mod event_handler;
mod file_picker;
mod host_effects;
mod init;
mod ipc_dispatch;
mod polling;
mod shutdown;
mod title;
mod transcript;
mod types;

pub use core::WebBridgeApp;
