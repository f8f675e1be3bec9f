pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfigError, FileHandlerError};
pub use models::{Action, CopyEntry, Entry, SyncConfig};
pub use services::{FileHandler, SyncReport};
pub use utils::{FsOps, LocalFs};

// Host application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config_path: std::path::PathBuf,
    pub log_level: String,
}
