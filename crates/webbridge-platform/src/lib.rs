pub mod notifications;
pub mod paths;

pub use notifications::notify;
pub use paths::{config_dir, config_file, data_dir, database_file, ensure_dirs, log_dir};
