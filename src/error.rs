use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while executing a batch of file actions
#[derive(Debug, Error)]
pub enum FileHandlerError {
    #[error("Unknown action '{action}', expected one of: mkdir, copy, copy_req, copy_opt")]
    UnknownAction { action: String },

    #[error("Malformed '{action}' entry {entry}: expected {expected}")]
    MalformedEntry {
        action: String,
        entry: String,
        expected: &'static str,
    },

    #[error("Source file '{}' does not exist", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Error copying {} to {}", src.display(), dest.display())]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("Error creating directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

impl FileHandlerError {
    /// The underlying OS error, when the failure came from a filesystem primitive
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            FileHandlerError::Copy { error, .. } | FileHandlerError::CreateDir { error, .. } => {
                Some(error)
            }
            _ => None,
        }
    }
}

/// Errors raised while loading a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("Failed to parse YAML configuration")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON configuration")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = FileHandlerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_message_names_path() {
        let err = FileHandlerError::SourceNotFound {
            path: PathBuf::from("in/missing.txt"),
        };
        assert_eq!(err.to_string(), "Source file 'in/missing.txt' does not exist");
        assert!(err.io_error().is_none());
    }

    #[test]
    fn test_io_error_is_kept_as_source() {
        let err = FileHandlerError::CreateDir {
            path: PathBuf::from("/dev/null/foo"),
            error: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.io_error().map(io::Error::kind),
            Some(io::ErrorKind::PermissionDenied)
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
