pub mod errors;
pub mod events;

pub use errors::{ConfigError, PlatformError, WebBridgeError};
pub use events::{BridgeEvent, EventBus};

pub type Result<T> = std::result::Result<T, WebBridgeError>;
