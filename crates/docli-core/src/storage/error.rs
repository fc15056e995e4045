//! Storage error handling
//!
//! Provides typed errors for repository operations with descriptive messages
//! and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// `initialize` called on an existing configuration
    #[error("A documentation configuration already exists at '{path}'")]
    AlreadyExists { path: PathBuf },

    /// Any operation other than `initialize` before a configuration exists
    #[error("No documentation configuration found at '{path}'")]
    NotInitialized { path: PathBuf },

    /// No document with the given ID
    #[error("Document metadata with ID '{id}' not found")]
    DocMetaNotFound { id: String },

    /// Platform is not part of the configuration
    #[error("Platform '{platform}' not found")]
    PlatformNotFound { platform: String },

    /// A document with this ID is already stored
    #[error("Document metadata with ID '{id}' already exists")]
    DuplicateId { id: String },

    /// Document fields failed validation
    #[error("Invalid document metadata: {reason}")]
    InvalidDocMeta { reason: String },

    /// Failed to read the canonical file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Canonical file exists but cannot be parsed
    #[error("Invalid document format in '{path}': {details}")]
    InvalidFormat { path: PathBuf, details: String },

    /// Failed to create the docs directory
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to serialize the configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Broad classification of a [`StorageError`]
///
/// Callers use this to decide whether an error is user-facing or fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    AlreadyExists,
    NotInitialized,
    NotFound,
    Invalid,
    LoadError,
    WriteError,
}

impl StorageError {
    /// Create an error from a write-side I/O error with path context
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            // StorageFull is not stable on every toolchain, so also match the message
            _ if is_disk_full_error(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Classify this error
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::AlreadyExists { .. } => StorageErrorKind::AlreadyExists,
            StorageError::NotInitialized { .. } => StorageErrorKind::NotInitialized,
            StorageError::DocMetaNotFound { .. } | StorageError::PlatformNotFound { .. } => {
                StorageErrorKind::NotFound
            }
            StorageError::DuplicateId { .. } | StorageError::InvalidDocMeta { .. } => {
                StorageErrorKind::Invalid
            }
            StorageError::ReadError { .. } | StorageError::InvalidFormat { .. } => {
                StorageErrorKind::LoadError
            }
            StorageError::CreateDirectory { .. }
            | StorageError::PermissionDenied { .. }
            | StorageError::DiskFull { .. }
            | StorageError::WriteError { .. }
            | StorageError::AtomicWriteFailed { .. }
            | StorageError::Serialize(_) => StorageErrorKind::WriteError,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Recoverable errors leave the stored configuration untouched and can be
    /// reported to the user without aborting.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.kind(),
            StorageErrorKind::LoadError | StorageErrorKind::WriteError
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::AlreadyExists { .. } => {
                Some("To re-initialize, back up your existing configuration and delete it before running 'docli init' again.")
            }
            StorageError::NotInitialized { .. } => {
                Some("Please run 'docli init' first to initialize your project.")
            }
            StorageError::DocMetaNotFound { .. } => {
                Some("Run 'docli list docmeta' to see the available IDs.")
            }
            StorageError::PlatformNotFound { .. } => {
                Some("Run 'docli list platforms' to see the configured platforms.")
            }
            StorageError::InvalidFormat { .. } => {
                Some("Fix or restore spec.json by hand. It is the source of truth and is never rewritten while it cannot be parsed.")
            }
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to run with different permissions or change ownership.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::from_io(io_err, PathBuf::from("/test/path"));

        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert_eq!(err.kind(), StorageErrorKind::WriteError);
        assert!(!err.is_recoverable());
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_disk_full_detection() {
        let io_err = io::Error::new(io::ErrorKind::Other, "No space left on device");
        let err = StorageError::from_io(io_err, PathBuf::from("/full/disk"));

        assert!(matches!(err, StorageError::DiskFull { .. }));
        assert_eq!(err.kind(), StorageErrorKind::WriteError);
    }

    #[test]
    fn test_other_io_is_write_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing parent");
        let err = StorageError::from_io(io_err, PathBuf::from("/a/b"));

        assert!(matches!(err, StorageError::WriteError { .. }));
    }

    #[test]
    fn test_kinds() {
        let cases = [
            (
                StorageError::AlreadyExists {
                    path: PathBuf::from(".docs/spec.json"),
                },
                StorageErrorKind::AlreadyExists,
            ),
            (
                StorageError::NotInitialized {
                    path: PathBuf::from(".docs/spec.json"),
                },
                StorageErrorKind::NotInitialized,
            ),
            (
                StorageError::DocMetaNotFound { id: "x".into() },
                StorageErrorKind::NotFound,
            ),
            (
                StorageError::PlatformNotFound {
                    platform: "readme".into(),
                },
                StorageErrorKind::NotFound,
            ),
            (
                StorageError::DuplicateId { id: "x".into() },
                StorageErrorKind::Invalid,
            ),
            (
                StorageError::InvalidFormat {
                    path: PathBuf::from(".docs/spec.json"),
                    details: "expected value".into(),
                },
                StorageErrorKind::LoadError,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{}", err);
        }
    }

    #[test]
    fn test_recoverable() {
        assert!(StorageError::NotInitialized {
            path: PathBuf::from(".docs/spec.json")
        }
        .is_recoverable());
        assert!(StorageError::DocMetaNotFound { id: "x".into() }.is_recoverable());
        assert!(!StorageError::InvalidFormat {
            path: PathBuf::from(".docs/spec.json"),
            details: "bad".into()
        }
        .is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::DocMetaNotFound {
            id: "3xYz".to_string(),
        };
        assert_eq!(err.to_string(), "Document metadata with ID '3xYz' not found");

        let err = StorageError::NotInitialized {
            path: PathBuf::from(".docs/spec.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("No documentation configuration"));
        assert!(msg.contains(".docs/spec.json"));
        assert!(err.recovery_suggestion().unwrap().contains("docli init"));
    }
}
