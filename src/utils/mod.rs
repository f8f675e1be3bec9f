pub mod file_operations;

pub use file_operations::{copy_path, make_dir, FsOps, LocalFs};
