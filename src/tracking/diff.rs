//! Comparing a scan against the manifest and folding changes back in.
//!
//! Only modifications are detected. A scanned entry without a manifest record
//! is not reported, and [`merge`] never adds it: it overwrites records that
//! already exist and leaves everything else, including records for entries
//! that have since disappeared, as they were.
//!
//! A manifest record whose `mtime` cannot be read counts as modified, so the
//! next merge repairs it.

use crate::tracking::manifest::Manifest;
use crate::tracking::record::FileRecord;
use serde_json::Value;
use std::collections::HashMap;

/// Scanned records whose modification second differs from the manifest
///
/// Output follows scan order.
#[must_use]
pub fn diff(current: &[FileRecord], manifest: &Manifest) -> Vec<FileRecord> {
    current
        .iter()
        .filter(|record| {
            manifest.entry(&record.name).is_some_and(|entry| {
                FileRecord::from_entry(entry).is_none_or(|previous| !record.same_second(&previous))
            })
        })
        .cloned()
        .collect()
}

/// Overwrite every manifest record named in `changed`
///
/// Returns the number of records overwritten. Only `name` and `mtime` of a
/// matching record change; its other fields, element order and unmatched
/// elements are untouched.
pub fn merge(manifest: &mut Manifest, changed: &[FileRecord]) -> usize {
    let updates: HashMap<&str, &FileRecord> = changed
        .iter()
        .map(|record| (record.name.as_str(), record))
        .collect();

    let mut replaced = 0;
    for entry in manifest.entries_mut() {
        let update = FileRecord::entry_name(entry).and_then(|name| updates.get(name).copied());
        if let (Some(update), Value::Object(fields)) = (update, entry) {
            update.write_into(fields);
            replaced += 1;
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn record(name: &str, secs: i64, millis: u32) -> FileRecord {
        FileRecord::new(
            name,
            Utc.timestamp_opt(secs, millis * 1_000_000).unwrap(),
        )
    }

    #[test]
    fn test_diff_reports_modified_in_scan_order() {
        let manifest = Manifest::from_records(&[
            record("b.txt", 100, 0),
            record("a.txt", 100, 0),
            record("c.txt", 100, 0),
        ]);
        let current = vec![
            record("a.txt", 200, 0),
            record("b.txt", 300, 0),
            record("c.txt", 100, 0),
        ];

        let changed = diff(&current, &manifest);

        assert_eq!(changed, vec![record("a.txt", 200, 0), record("b.txt", 300, 0)]);
    }

    #[test]
    fn test_diff_ignores_subsecond_changes() {
        let manifest = Manifest::from_records(&[record("a.txt", 100, 1)]);
        let current = vec![record("a.txt", 100, 999)];

        assert!(diff(&current, &manifest).is_empty());
    }

    #[test]
    fn test_diff_reports_older_timestamps() {
        let manifest = Manifest::from_records(&[record("a.txt", 500, 0)]);
        let current = vec![record("a.txt", 400, 0)];

        assert_eq!(diff(&current, &manifest), current);
    }

    #[test]
    fn test_diff_ignores_new_entries() {
        let manifest = Manifest::from_records(&[record("a.txt", 100, 0)]);
        let current = vec![record("a.txt", 100, 0), record("new.txt", 999, 0)];

        assert!(diff(&current, &manifest).is_empty());
    }

    #[test]
    fn test_diff_against_empty_manifest() {
        let current = vec![record("a.txt", 100, 0)];

        assert!(diff(&current, &Manifest::new()).is_empty());
    }

    #[test]
    fn test_merge_overwrites_in_place() {
        let mut manifest = Manifest::from_records(&[
            record("a.txt", 100, 0),
            record("deleted.txt", 50, 0),
            record("b.txt", 100, 0),
        ]);

        let replaced = merge(&mut manifest, &[record("b.txt", 200, 0)]);

        assert_eq!(replaced, 1);
        assert_eq!(
            manifest,
            Manifest::from_records(&[
                record("a.txt", 100, 0),
                record("deleted.txt", 50, 0),
                record("b.txt", 200, 0),
            ])
        );
    }

    #[test]
    fn test_merge_never_adds_records() {
        let mut manifest = Manifest::from_records(&[record("a.txt", 100, 0)]);

        let replaced = merge(&mut manifest, &[record("new.txt", 200, 0)]);

        assert_eq!(replaced, 0);
        assert_eq!(manifest, Manifest::from_records(&[record("a.txt", 100, 0)]));
    }

    #[test]
    fn test_merge_overwrites_every_duplicate() {
        let mut manifest = Manifest::from_records(&[
            record("a.txt", 100, 0),
            record("a.txt", 150, 0),
        ]);

        let replaced = merge(&mut manifest, &[record("a.txt", 200, 0)]);

        assert_eq!(replaced, 2);
        assert_eq!(
            manifest,
            Manifest::from_records(&[record("a.txt", 200, 0), record("a.txt", 200, 0)])
        );
    }

    #[test]
    fn test_diff_reports_unreadable_mtime() {
        let manifest = Manifest::from_entries(vec![
            json!({"name": "a.txt", "mtime": "not a date"}),
            json!({"name": "b.txt"}),
            json!({"name": "c.txt", "mtime": 100}),
        ]);
        let current = vec![
            record("a.txt", 100, 0),
            record("b.txt", 100, 0),
            record("c.txt", 100, 0),
        ];

        assert_eq!(diff(&current, &manifest), current);
    }

    #[test]
    fn test_diff_skips_elements_without_string_name() {
        let manifest = Manifest::from_entries(vec![
            json!(1),
            json!({"mtime": "1970-01-01T00:01:40.000Z"}),
            json!({"name": null, "mtime": "1970-01-01T00:01:40.000Z"}),
        ]);

        assert!(diff(&[record("a.txt", 200, 0)], &manifest).is_empty());
    }

    #[test]
    fn test_merge_keeps_extra_fields_and_foreign_elements() {
        let mut manifest = Manifest::from_entries(vec![
            json!({"size": 5, "name": "a.txt", "mtime": "not a date"}),
            json!(1),
            json!({"mtime": "1970-01-01T00:01:40.000Z"}),
        ]);

        let replaced = merge(&mut manifest, &[record("a.txt", 200, 0)]);

        assert_eq!(replaced, 1);
        assert_eq!(
            manifest.entries(),
            &[
                json!({"size": 5, "name": "a.txt", "mtime": "1970-01-01T00:03:20.000Z"}),
                json!(1),
                json!({"mtime": "1970-01-01T00:01:40.000Z"}),
            ]
        );
    }
}
