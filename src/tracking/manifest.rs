//! Persisted manifest of last-seen modification times.
//!
//! The manifest is the durable "last known state" of a directory. On disk it
//! is a JSON object with a single `stats` array:
//!
//! ```json
//! {"stats":[{"name":"a.txt","mtime":"2020-01-02T03:04:05.678Z"}]}
//! ```
//!
//! Elements are kept as raw JSON in their on-disk order, so a rewrite only
//! touches the `name`/`mtime` of entries that changed and carries everything
//! else over verbatim: extra fields, elements without a string `name`, even
//! non-object elements. Lookups go through a name index built at load time.
//!
//! Loading never fails. A missing, unreadable or unparseable file, or a
//! document that is `null`, `false`, `0` or `""`, is reported as
//! [`ManifestState::Absent`] (a cold start). Any other document whose `stats`
//! is missing or not an array is [`ManifestState::Malformed`].

use crate::config::LogFileLocation;
use crate::error::{DetectError, Result};
use crate::tracking::record::FileRecord;
use crate::utils::{paths, serialization};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use tracing::{Level, debug, span, warn};

/// Name of the array holding the records
const STATS_FIELD: &str = "stats";

/// Ordered manifest elements with a name index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Elements in persisted order
    stats: Vec<Value>,
    /// Name to index of the first element with that name
    by_name: HashMap<String, usize>,
}

/// Borrowed on-disk shape of a manifest
#[derive(Serialize)]
struct ManifestFile<'a> {
    stats: &'a [Value],
}

/// Outcome of reading a manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestState {
    /// A usable manifest
    Present(Manifest),
    /// Valid JSON without a `stats` array; present, but nothing can be compared
    Malformed,
    /// No usable manifest: missing, unreadable, not parseable, or falsy
    Absent,
}

impl Manifest {
    /// Create an empty manifest
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest from scanned records, keeping their order
    #[must_use]
    pub fn from_records(records: &[FileRecord]) -> Self {
        Self::from_entries(records.iter().map(FileRecord::to_entry).collect())
    }

    /// Build a manifest from raw elements, keeping their order
    ///
    /// Only elements with a string `name` are indexed.
    #[must_use]
    pub fn from_entries(stats: Vec<Value>) -> Self {
        let mut by_name = HashMap::with_capacity(stats.len());
        for (i, entry) in stats.iter().enumerate() {
            if let Some(name) = FileRecord::entry_name(entry) {
                by_name.entry(name.to_string()).or_insert(i);
            }
        }
        Self { stats, by_name }
    }

    /// First element named `name`
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&Value> {
        self.by_name.get(name).map(|&i| &self.stats[i])
    }

    /// First element named `name`, if its `mtime` is readable
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FileRecord> {
        self.entry(name).and_then(FileRecord::from_entry)
    }

    /// Elements in persisted order
    #[must_use]
    pub fn entries(&self) -> &[Value] {
        &self.stats
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether the manifest holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Mutable elements for in-place overwrites that keep every name unchanged
    pub(crate) fn entries_mut(&mut self) -> &mut [Value] {
        &mut self.stats
    }

    /// Interpret a raw manifest document
    fn from_json(bytes: &[u8]) -> std::result::Result<ManifestState, serde_json::Error> {
        let document: Value = serialization::deserialize(bytes)?;

        if is_falsy(&document) {
            return Ok(ManifestState::Absent);
        }

        match document {
            Value::Object(mut fields) => match fields.remove(STATS_FIELD) {
                Some(Value::Array(stats)) => {
                    Ok(ManifestState::Present(Self::from_entries(stats)))
                }
                _ => Ok(ManifestState::Malformed),
            },
            _ => Ok(ManifestState::Malformed),
        }
    }

    /// Serialize to the on-disk JSON form
    fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serialization::serialize(&ManifestFile {
            stats: &self.stats,
        })
    }
}

/// `null`, `false`, zero and the empty string
fn is_falsy(document: &Value) -> bool {
    match document {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl ManifestState {
    /// The manifest, if one is usable
    #[must_use]
    pub fn into_manifest(self) -> Option<Manifest> {
        match self {
            Self::Present(manifest) => Some(manifest),
            Self::Malformed | Self::Absent => None,
        }
    }

    /// Whether a cold start is required
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Reads and writes the manifest at a resolved [`LogFileLocation`]
#[derive(Debug, Clone)]
pub struct ManifestStore {
    location: LogFileLocation,
}

impl ManifestStore {
    /// Create a store for `location`
    #[must_use]
    pub const fn new(location: LogFileLocation) -> Self {
        Self { location }
    }

    /// Resolved manifest location
    #[must_use]
    pub const fn location(&self) -> &LogFileLocation {
        &self.location
    }

    /// Read the manifest
    ///
    /// Read and parse failures are logged and reported as
    /// [`ManifestState::Absent`]; they never surface as errors.
    #[must_use]
    pub fn load(&self) -> ManifestState {
        let path = self.location.file();
        let span = span!(Level::DEBUG, "load_manifest", path = %path.display());
        let _guard = span.enter();

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No manifest found");
                return ManifestState::Absent;
            }
            Err(e) => {
                warn!(error = %e, "Manifest unreadable, treating as absent");
                return ManifestState::Absent;
            }
        };

        match Manifest::from_json(&data) {
            Ok(ManifestState::Present(manifest)) => {
                debug!(records = manifest.len(), "Manifest loaded");
                ManifestState::Present(manifest)
            }
            Ok(ManifestState::Malformed) => {
                warn!("Manifest has no stats array, nothing to compare");
                ManifestState::Malformed
            }
            Ok(ManifestState::Absent) => {
                debug!("Manifest holds no document");
                ManifestState::Absent
            }
            Err(e) => {
                warn!(error = %e, "Manifest unparseable, treating as absent");
                ManifestState::Absent
            }
        }
    }

    /// Write `manifest`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The manifest cannot be serialized
    /// - The file cannot be written (including a missing log directory)
    pub fn save(&self, manifest: &Manifest) -> Result<()> {
        let path = self.location.file();

        let data = manifest
            .to_json()
            .map_err(|source| DetectError::ManifestSerialize {
                path: path.to_path_buf(),
                source,
            })?;

        std::fs::write(path, data).map_err(|source| DetectError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), records = manifest.len(), "Manifest written");
        Ok(())
    }

    /// Create the log directory if it is missing
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist and cannot be created.
    pub fn ensure_directory(&self) -> Result<()> {
        let dir = self.location.dir();

        let created = paths::ensure_directory(dir).map_err(|source| {
            DetectError::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            }
        })?;

        if created {
            debug!(dir = %dir.display(), "Log directory created");
        }
        Ok(())
    }

    /// Whether the manifest file exists on disk
    #[must_use]
    pub fn exists(&self) -> bool {
        self.location.file().is_file()
    }
}
