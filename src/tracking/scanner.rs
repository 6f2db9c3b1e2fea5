//! Directory scanner producing one [`FileRecord`] per directory entry.
//!
//! The scan is shallow: subdirectories are reported as entries like files,
//! never descended into. Entry names are listed in file-name order and each
//! entry is stat'd on the rayon pool; the results keep listing order and the
//! first failing stat aborts the whole scan.

use crate::error::{DetectError, Result};
use crate::tracking::record::FileRecord;
use crate::utils::thread_pool;
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};
use walkdir::WalkDir;

/// Scanner for the entries of a single directory
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    /// Directory whose entries are listed
    dir: PathBuf,
    /// Stat workers; `0` uses the shared pool
    parallel_threads: usize,
}

impl DirectoryScanner {
    /// Create a scanner for `dir` using the shared thread pool
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            parallel_threads: 0,
        }
    }

    /// Use a dedicated pool of `threads` workers for stat calls
    #[must_use]
    pub fn with_parallel_threads(mut self, threads: usize) -> Self {
        self.parallel_threads = threads;
        self
    }

    /// Directory being scanned
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List every entry and stat it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory does not exist or is not a directory
    /// - The directory cannot be listed
    /// - An entry name is not valid UTF-8
    /// - Any entry cannot be stat'd (including broken symlinks)
    pub fn scan(&self) -> Result<Vec<FileRecord>> {
        let span = span!(Level::DEBUG, "scan", dir = %self.dir.display());
        let _guard = span.enter();

        let names = self.list_entries()?;

        let records = thread_pool::run_with_threads(self.parallel_threads, || {
            names
                .par_iter()
                .map(|name| self.stat_entry(name))
                .collect::<Result<Vec<_>>>()
        })?;

        debug!(entries = records.len(), "Directory scanned");
        Ok(records)
    }

    /// Entry names in file-name order
    fn list_entries(&self) -> Result<Vec<String>> {
        let metadata = std::fs::metadata(&self.dir).map_err(|source| self.scan_error(source))?;
        if !metadata.is_dir() {
            return Err(self.scan_error(io::Error::new(
                io::ErrorKind::NotADirectory,
                "target is not a directory",
            )));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| self.scan_error(io::Error::from(e)))?;

            let name = entry
                .file_name()
                .to_str()
                .ok_or_else(|| DetectError::NonUtf8Name {
                    dir: self.dir.clone(),
                    name: entry.file_name().to_string_lossy().into_owned(),
                })?;
            names.push(name.to_string());
        }

        Ok(names)
    }

    /// Stat a single entry, following symlinks
    fn stat_entry(&self, name: &str) -> Result<FileRecord> {
        let path = self.dir.join(name);

        let modified = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .map_err(|source| DetectError::Scan { path, source })?;

        Ok(FileRecord::from_system_time(name, modified))
    }

    fn scan_error(&self, source: io::Error) -> DetectError {
        DetectError::Scan {
            path: self.dir.clone(),
            source,
        }
    }
}
