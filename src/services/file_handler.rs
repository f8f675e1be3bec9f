use crate::error::{FileHandlerError, Result};
use crate::models::{Action, Entry, SyncConfig};
use crate::utils::{FsOps, LocalFs};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Executes the actions of a [`SyncConfig`] against the filesystem
///
/// Actions run in configuration order and the first failure aborts the batch.
/// Nothing is rolled back or retried.
#[derive(Debug)]
pub struct FileHandler<'a, F: FsOps = LocalFs> {
    config: &'a SyncConfig,
    fs: F,
}

impl<'a> FileHandler<'a, LocalFs> {
    pub fn new(config: &'a SyncConfig) -> Self {
        Self::with_fs(config, LocalFs)
    }
}

impl<'a, F: FsOps> FileHandler<'a, F> {
    pub fn with_fs(config: &'a SyncConfig, fs: F) -> Self {
        Self { config, fs }
    }

    /// Run every configured action in order
    pub fn sync(&self) -> Result<SyncReport> {
        let mut report = SyncReport::empty();

        for (name, entries) in self.config.iter() {
            let action = name.parse::<Action>().map_err(|e| {
                error!("Unknown action '{}', ABORT!", name);
                e
            })?;
            self.dispatch(action, entries, &mut report)?;
        }

        Ok(report)
    }

    /// Copy every `[src, dest]` entry, failing if a source is missing
    pub fn copy_req(&self, entries: &[Entry]) -> Result<SyncReport> {
        let mut report = SyncReport::empty();
        self.copy_files(Action::CopyReq, entries, &mut report)?;
        Ok(report)
    }

    /// Copy every `[src, dest]` entry, skipping missing sources with a warning
    pub fn copy_opt(&self, entries: &[Entry]) -> Result<SyncReport> {
        let mut report = SyncReport::empty();
        self.copy_files(Action::CopyOpt, entries, &mut report)?;
        Ok(report)
    }

    /// Create every listed directory along with its parents
    pub fn mkdir(&self, entries: &[Entry]) -> Result<SyncReport> {
        let mut report = SyncReport::empty();
        self.make_dirs(entries, &mut report)?;
        Ok(report)
    }

    fn dispatch(&self, action: Action, entries: &[Entry], report: &mut SyncReport) -> Result<()> {
        if action.is_deprecated() {
            warn!(
                "Action '{}' is deprecated, use 'copy_req' or 'copy_opt' instead",
                action
            );
        }

        match action {
            Action::Mkdir => self.make_dirs(entries, report),
            Action::Copy | Action::CopyReq | Action::CopyOpt => {
                self.copy_files(action, entries, report)
            }
        }
    }

    fn copy_files(&self, action: Action, entries: &[Entry], report: &mut SyncReport) -> Result<()> {
        for entry in entries {
            let Some(pair) = entry.as_copy() else {
                error!("Malformed '{}' entry {}", action, entry);
                return Err(FileHandlerError::MalformedEntry {
                    action: action.name().to_string(),
                    entry: entry.to_string(),
                    expected: "a list of the form [src, dest]",
                });
            };
            let (src, dest) = (pair.source, pair.destination);

            if self.fs.exists(src) {
                if let Err(e) = self.fs.copy(src, dest) {
                    error!("Error copying {} to {}: {}", src.display(), dest.display(), e);
                    return Err(FileHandlerError::Copy {
                        src: src.to_path_buf(),
                        dest: dest.to_path_buf(),
                        error: e,
                    });
                }
                info!("Copied {} to {}", src.display(), dest.display());
                report.files_copied += 1;
            } else if action.requires_source() {
                error!(
                    "Source file '{}' does not exist and is required, ABORT!",
                    src.display()
                );
                return Err(FileHandlerError::SourceNotFound {
                    path: src.to_path_buf(),
                });
            } else {
                warn!("Source file '{}' does not exist, skipping!", src.display());
                report.skipped_sources.push(src.to_path_buf());
            }
        }

        Ok(())
    }

    fn make_dirs(&self, entries: &[Entry], report: &mut SyncReport) -> Result<()> {
        for entry in entries {
            let Some(path) = entry.as_path() else {
                error!("Malformed 'mkdir' entry {}", entry);
                return Err(FileHandlerError::MalformedEntry {
                    action: Action::Mkdir.name().to_string(),
                    entry: entry.to_string(),
                    expected: "a directory path",
                });
            };

            if let Err(e) = self.fs.make_dir(path) {
                error!("Error creating directory {}: {}", path.display(), e);
                return Err(FileHandlerError::CreateDir {
                    path: path.to_path_buf(),
                    error: e,
                });
            }
            info!("Created {}", path.display());
            report.directories_created += 1;
        }

        Ok(())
    }
}

/// Summary of a completed batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub directories_created: usize,
    pub files_copied: usize,
    pub skipped_sources: Vec<PathBuf>,
}

impl SyncReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn skipped_files(&self) -> usize {
        self.skipped_sources.len()
    }

    pub fn total_processed(&self) -> usize {
        self.directories_created + self.files_copied + self.skipped_files()
    }
}
