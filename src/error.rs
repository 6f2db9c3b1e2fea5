//! Error taxonomy for change detection.
//!
//! Every variant is fatal for the invocation that produced it. Manifest read
//! failures are deliberately absent: an unreadable or unparseable manifest is
//! reported as [`crate::tracking::ManifestState::Absent`] and triggers a cold
//! start instead of an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::ChangeDetector`] and its components.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The target directory argument was missing or empty
    #[error("Configuration error: {0}")]
    Config(String),

    /// The target directory could not be listed, or an entry could not be stat'd
    #[error("Failed to scan {}: {source}", .path.display())]
    Scan {
        /// Directory or entry that failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A directory entry has a name that is not valid UTF-8
    #[error("Entry name in {} is not valid UTF-8: {name}", .dir.display())]
    NonUtf8Name {
        /// Directory being scanned
        dir: PathBuf,
        /// Lossy rendering of the offending name
        name: String,
    },

    /// The log directory could not be created for a reason other than pre-existence
    #[error("Failed to create log directory {}: {source}", .path.display())]
    DirectoryCreate {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be written to disk
    #[error("Failed to write manifest {}: {source}", .path.display())]
    ManifestWrite {
        /// Manifest file path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be serialized
    #[error("Failed to serialize manifest {}: {source}", .path.display())]
    ManifestSerialize {
        /// Manifest file path
        path: PathBuf,
        /// Underlying serialization failure
        #[source]
        source: serde_json::Error,
    },
}

impl DetectError {
    /// Returns `true` for configuration errors raised before any I/O
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if the directory scan failed
    #[must_use]
    pub const fn is_scan_error(&self) -> bool {
        matches!(self, Self::Scan { .. } | Self::NonUtf8Name { .. })
    }

    /// Returns `true` if persisting the manifest failed
    #[must_use]
    pub const fn is_write_error(&self) -> bool {
        matches!(
            self,
            Self::ManifestWrite { .. } | Self::ManifestSerialize { .. }
        )
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DetectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        let config = DetectError::Config("No target directory defined".to_string());
        assert!(config.is_config_error());
        assert!(!config.is_scan_error());

        let scan = DetectError::Scan {
            path: PathBuf::from("/missing"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(scan.is_scan_error());
        assert!(!scan.is_write_error());

        let write = DetectError::ManifestWrite {
            path: PathBuf::from("/ro/.log/mtime.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(write.is_write_error());
    }

    #[test]
    fn test_error_messages_name_the_path() {
        let err = DetectError::DirectoryCreate {
            path: PathBuf::from("/nope/.log"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/nope/.log"));
    }
}
