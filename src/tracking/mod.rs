//! Building blocks of change detection.
//!
//! - [`crate::tracking::DirectoryScanner`] - lists a directory and stats each entry
//! - [`crate::tracking::ManifestStore`] - loads and persists the manifest
//! - [`crate::tracking::diff`] - compares a scan to the manifest and merges changes
//!
//! # Usage
//!
//! ```no_run
//! use lastchanged::config::{LogFileLocation, LogFileOptions};
//! use lastchanged::tracking::{DirectoryScanner, ManifestStore, diff};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), lastchanged::DetectError> {
//! let target = Path::new("/srv/site");
//! let current = DirectoryScanner::new(target).scan()?;
//!
//! let store = ManifestStore::new(LogFileLocation::resolve(target, &LogFileOptions::default()));
//! if let Some(mut manifest) = store.load().into_manifest() {
//!     let changed = diff::diff(&current, &manifest);
//!     if !changed.is_empty() {
//!         diff::merge(&mut manifest, &changed);
//!         store.save(&manifest)?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod manifest;
pub mod record;
pub mod scanner;

pub use manifest::{Manifest, ManifestState, ManifestStore};
pub use record::FileRecord;
pub use scanner::DirectoryScanner;
