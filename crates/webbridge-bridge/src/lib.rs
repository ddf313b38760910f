//! The host-side call surface exposed to embedded web content.
//!
//! Pages invoke operations by name; each name maps to one [`OpKind`] and
//! its arguments are validated into a typed [`BridgeCall`] before anything
//! runs. [`Bridge::handle`] answers every call with exactly one [`Reply`].
//!
//! Side effects that belong to the window (message display, title, exit)
//! go through the [`HostEffects`] trait so the bridge has no toolkit
//! dependency.

mod bridge;
pub mod calc;
pub mod error;
pub mod host;
pub mod ops;
pub mod reply;
pub mod sandbox;
pub mod sysinfo;

pub use bridge::{file_selection_reply, Bridge, BridgeOptions};
pub use calc::{evaluate, CalcValue};
pub use error::{CalcError, CallError, FileError};
pub use host::HostEffects;
pub use ops::{BridgeCall, OpKind};
pub use reply::Reply;
pub use sandbox::FileSandbox;
pub use sysinfo::SystemInfoKind;
