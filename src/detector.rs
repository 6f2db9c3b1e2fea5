//! The change detector: scan, load, diff, persist.

use crate::config::{DetectorConfig, LogFileLocation, LogFileOptions};
use crate::error::{DetectError, Result};
use crate::tracking::diff;
use crate::tracking::{DirectoryScanner, FileRecord, Manifest, ManifestState, ManifestStore};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span};

/// Detects entries of one directory modified since the previous run
///
/// Each [`detect`](Self::detect) call scans the target, compares the result
/// with the persisted manifest and updates the manifest before returning.
/// Runs against the same manifest are not synchronized; callers serialize
/// them if they can overlap.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    target: PathBuf,
    scanner: DirectoryScanner,
    store: ManifestStore,
}

impl ChangeDetector {
    /// Create a detector for `target` with the given manifest location overrides
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Config`] if `target` is empty.
    pub fn new(target: impl AsRef<Path>, options: &LogFileOptions) -> Result<Self> {
        let target = target.as_ref();
        if target.as_os_str().is_empty() {
            return Err(DetectError::Config(
                "No target directory defined".to_string(),
            ));
        }

        let location = LogFileLocation::resolve(target, options);

        Ok(Self {
            target: target.to_path_buf(),
            scanner: DirectoryScanner::new(target),
            store: ManifestStore::new(location),
        })
    }

    /// Create a detector from a loaded [`DetectorConfig`]
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Config`] if `target` is empty.
    pub fn from_config(target: impl AsRef<Path>, config: &DetectorConfig) -> Result<Self> {
        let mut detector = Self::new(target, &config.log_file)?;
        detector.scanner = detector
            .scanner
            .with_parallel_threads(config.performance.parallel_threads);
        Ok(detector)
    }

    /// Directory being watched for changes
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Where the manifest is read from and written to
    #[must_use]
    pub const fn location(&self) -> &LogFileLocation {
        self.store.location()
    }

    /// Return the entries modified since the last run
    ///
    /// On a cold start (no usable manifest) every scanned entry is returned and
    /// written as the new manifest. Otherwise only entries already in the
    /// manifest whose modification second differs are returned, and those
    /// records are overwritten in the manifest. Nothing is written when
    /// nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target cannot be scanned
    /// - The log directory cannot be created on a cold start
    /// - The manifest cannot be written
    pub fn detect(&self) -> Result<Vec<FileRecord>> {
        let span = span!(Level::DEBUG, "detect_changes", target = %self.target.display());
        let _guard = span.enter();

        let current = self.scanner.scan()?;

        match self.store.load() {
            ManifestState::Present(manifest) => self.update(manifest, &current),
            ManifestState::Malformed => {
                debug!("Manifest unusable, reporting no changes");
                Ok(Vec::new())
            }
            ManifestState::Absent => self.initialize(current),
        }
    }

    /// Diff against an existing manifest and persist any changes
    fn update(&self, mut manifest: Manifest, current: &[FileRecord]) -> Result<Vec<FileRecord>> {
        let changed = diff::diff(current, &manifest);

        if changed.is_empty() {
            debug!("No changes detected, manifest untouched");
            return Ok(changed);
        }

        let replaced = diff::merge(&mut manifest, &changed);
        self.store.save(&manifest)?;

        debug!(changed = changed.len(), replaced, "Manifest updated");
        Ok(changed)
    }

    /// Record the full scan as the first manifest
    fn initialize(&self, current: Vec<FileRecord>) -> Result<Vec<FileRecord>> {
        self.store.ensure_directory()?;

        let manifest = Manifest::from_records(&current);
        self.store.save(&manifest)?;

        info!(
            entries = manifest.len(),
            manifest = %self.store.location().file().display(),
            "Initial manifest written"
        );
        Ok(current)
    }
}
