use super::LogFileOptions;
use crate::{DEFAULT_LOG_FILE_NAME, LOG_DIR_NAME};
use std::path::{Path, PathBuf};

/// Resolved manifest location: the `.log` directory and the file inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileLocation {
    dir: PathBuf,
    file: PathBuf,
}

impl LogFileLocation {
    /// Resolve the manifest location for `target`
    ///
    /// `options.path` replaces the target directory as the base of the `.log`
    /// folder and `options.name` replaces `mtime.json`; empty values fall back
    /// to the defaults.
    #[must_use]
    pub fn resolve(target: &Path, options: &LogFileOptions) -> Self {
        let base = options
            .path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(target);
        let name = options
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_LOG_FILE_NAME);

        let dir = base.join(LOG_DIR_NAME);
        let file = dir.join(name);

        Self { dir, file }
    }

    /// Directory holding the manifest
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Manifest file path
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }
}
