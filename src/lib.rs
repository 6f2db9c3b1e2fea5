#![warn(missing_docs)]

//! # lastchanged - mtime manifest change detection
//!
//! `lastchanged` reports which entries of a directory were modified since the
//! previous check. It stats every entry, compares the modification times with
//! a JSON manifest persisted next to the directory, and updates that manifest
//! in place. It is meant as a cheap trigger for incremental builds and syncs.
//!
//! ## Behavior
//!
//! - **Cold start**: with no usable manifest, every entry is reported and the
//!   full scan becomes the manifest (`<target>/.log/mtime.json` by default)
//! - **Modifications only**: entries missing from the manifest are neither
//!   reported nor added to it
//! - **Second granularity**: sub-second timestamp differences are ignored
//! - **No pruning**: manifest records for deleted entries are kept
//!
//! ## Architecture
//!
//! - [`detector`]: [`ChangeDetector`], the scan/load/diff/persist pipeline
//! - [`tracking`]: scanner, manifest store, diff and merge
//! - [`config`]: manifest location options and TOML configuration
//! - [`error`]: the [`DetectError`] taxonomy
//! - [`utils`]: thread pool, JSON and directory helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use lastchanged::{LogFileOptions, last_changed_files};
//!
//! # fn main() -> Result<(), lastchanged::DetectError> {
//! // Manifest at /srv/site/.log/mtime.json
//! let changed = last_changed_files("/srv/site", None)?;
//!
//! // Manifest at /var/cache/site/.log/site.json
//! let options = LogFileOptions::new()
//!     .with_path("/var/cache/site")
//!     .with_name("site.json");
//! let changed = last_changed_files("/srv/site", Some(&options))?;
//!
//! for record in &changed {
//!     println!("{} {}", record.name, record.mtime);
//! }
//! # Ok(())
//! # }
//! ```

/// Manifest location options and TOML configuration.
pub mod config;

/// Change detection pipeline.
pub mod detector;

/// Error types.
pub mod error;

/// Scanning, manifest persistence, diff and merge.
pub mod tracking;

/// Utility functions and helpers.
pub mod utils;

pub use config::{DetectorConfig, LogFileLocation, LogFileOptions};
pub use detector::ChangeDetector;
pub use error::DetectError;
pub use tracking::FileRecord;

use error::Result;
use std::path::Path;

/// Name of the hidden directory holding the manifest.
pub const LOG_DIR_NAME: &str = ".log";

/// Default manifest file name.
pub const DEFAULT_LOG_FILE_NAME: &str = "mtime.json";

/// Return the entries of `target` modified since the previous call.
///
/// `options` overrides where the manifest lives; `None` keeps it at
/// `<target>/.log/mtime.json`. See [`ChangeDetector::detect`] for the exact
/// semantics.
///
/// # Errors
///
/// Returns an error if:
/// - `target` is empty
/// - `target` cannot be scanned
/// - The log directory cannot be created
/// - The manifest cannot be written
pub fn last_changed_files(
    target: impl AsRef<Path>,
    options: Option<&LogFileOptions>,
) -> Result<Vec<FileRecord>> {
    let defaults = LogFileOptions::default();
    ChangeDetector::new(target, options.unwrap_or(&defaults))?.detect()
}
