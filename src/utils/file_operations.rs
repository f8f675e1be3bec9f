use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem primitives used by the file handler
///
/// Each call either succeeds or returns the OS error untouched.
pub trait FsOps {
    fn exists(&self, path: &Path) -> bool;

    fn copy(&self, source: &Path, destination: &Path) -> io::Result<()>;

    /// Create `path` and any missing parents; must succeed if it already exists
    fn make_dir(&self, path: &Path) -> io::Result<()>;
}

/// Primitives backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FsOps for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn copy(&self, source: &Path, destination: &Path) -> io::Result<()> {
        copy_path(source, destination)
    }

    fn make_dir(&self, path: &Path) -> io::Result<()> {
        make_dir(path)
    }
}

/// Copy a file or directory tree
///
/// A file copied onto an existing directory lands inside it under its own name.
/// Parent directories of `destination` are not created.
pub fn copy_path<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> io::Result<()> {
    let src_path = source.as_ref();
    let dest_path = destination.as_ref();

    if src_path.is_dir() {
        if resolve_path(dest_path)?.starts_with(fs::canonicalize(src_path)?) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot copy a directory into itself",
            ));
        }
        return copy_dir_all(src_path, dest_path);
    }

    let target = resolve_file_target(src_path, dest_path);
    if target.exists() && fs::canonicalize(&target)? == fs::canonicalize(src_path)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same file",
        ));
    }
    fs::copy(src_path, &target)?;

    Ok(())
}

/// Canonicalize the longest existing prefix of `path` and re-append the rest
fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut tail = Vec::new();

    loop {
        match fs::canonicalize(existing) {
            Ok(resolved) => {
                return Ok(tail.iter().rev().fold(resolved, |acc, part| acc.join(part)));
            }
            Err(e) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name);
                    existing = if parent.as_os_str().is_empty() {
                        Path::new(".")
                    } else {
                        parent
                    };
                }
                _ => return Err(e),
            },
        }
    }
}

fn resolve_file_target(source: &Path, destination: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) if destination.is_dir() => destination.join(name),
        _ => destination.to_path_buf(),
    }
}

fn copy_dir_all(source: &Path, destination: &Path) -> io::Result<()> {
    fs::create_dir_all(destination)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let entry_path = entry.path();
        let target_path = destination.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry_path, &target_path)?;
        } else {
            fs::copy(&entry_path, &target_path)?;
        }
    }

    Ok(())
}

/// Create a directory and its parents, succeeding when it already exists
pub fn make_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::create_dir_all(path.as_ref())
}
