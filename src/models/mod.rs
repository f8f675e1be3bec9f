pub mod action;
pub mod sync_config;

pub use action::Action;
pub use sync_config::{CopyEntry, Entry, SyncConfig};
