#![allow(dead_code)]

use anyhow::Result;
use filetime::{FileTime, set_file_mtime};
use lastchanged::{ChangeDetector, LogFileOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary target directory with a default-located manifest
pub struct TestTarget {
    pub temp_dir: TempDir,
}

impl TestTarget {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `name` and pin its mtime to `secs`
    pub fn write_file(&self, name: &str, secs: i64) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, name)?;
        set_file_mtime(&path, FileTime::from_unix_time(secs, 0))?;
        Ok(path)
    }

    /// Set the mtime of an existing entry
    pub fn touch(&self, name: &str, secs: i64, nanos: u32) -> Result<()> {
        set_file_mtime(self.path().join(name), FileTime::from_unix_time(secs, nanos))?;
        Ok(())
    }

    pub fn detector(&self) -> Result<ChangeDetector> {
        Ok(ChangeDetector::new(self.path(), &LogFileOptions::default())?)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path().join(".log").join("mtime.json")
    }

    pub fn read_manifest(&self) -> Result<serde_json::Value> {
        let raw = fs::read(self.manifest_path())?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// `(name, unix seconds)` pairs of the persisted manifest, in order
    pub fn manifest_entries(&self) -> Result<Vec<(String, i64)>> {
        let manifest = self.read_manifest()?;
        let stats = manifest["stats"]
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("manifest has no stats array"))?;

        stats
            .iter()
            .map(|entry| {
                let name = entry["name"]
                    .as_str()
                    .ok_or_else(|| anyhow::anyhow!("record without name"))?;
                let mtime = entry["mtime"]
                    .as_str()
                    .ok_or_else(|| anyhow::anyhow!("record without mtime"))?;
                let parsed = chrono::DateTime::parse_from_rfc3339(mtime)?;
                Ok((name.to_string(), parsed.timestamp()))
            })
            .collect()
    }
}
