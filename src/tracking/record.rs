//! A single scanned directory entry and its modification time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::SystemTime;

/// Manifest field holding the entry name
pub(crate) const NAME_FIELD: &str = "name";
/// Manifest field holding the modification time
pub(crate) const MTIME_FIELD: &str = "mtime";

/// Name and modification time of one directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Entry name, unique within one scan
    pub name: String,
    /// Last modification time, persisted as ISO-8601 UTC with milliseconds
    #[serde(with = "iso8601")]
    pub mtime: DateTime<Utc>,
}

impl FileRecord {
    /// Create a record
    #[must_use]
    pub fn new(name: impl Into<String>, mtime: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            mtime,
        }
    }

    /// Create a record from a filesystem timestamp
    #[must_use]
    pub fn from_system_time(name: impl Into<String>, modified: SystemTime) -> Self {
        Self::new(name, DateTime::<Utc>::from(modified))
    }

    /// Whether both records fall within the same wall-clock second
    ///
    /// Sub-second differences are not modifications.
    #[must_use]
    pub fn same_second(&self, other: &Self) -> bool {
        self.mtime.timestamp() == other.mtime.timestamp()
    }

    /// Name of a raw manifest element, if it is an object with a string `name`
    #[must_use]
    pub fn entry_name(entry: &Value) -> Option<&str> {
        entry.get(NAME_FIELD).and_then(Value::as_str)
    }

    /// Read a raw manifest element
    ///
    /// Returns `None` unless the element has a string `name` and an `mtime`
    /// that parses as an RFC 3339 timestamp.
    #[must_use]
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let name = Self::entry_name(entry)?;
        let mtime = entry
            .get(MTIME_FIELD)
            .and_then(Value::as_str)
            .and_then(iso8601::parse)?;
        Some(Self::new(name, mtime))
    }

    /// Overwrite `name` and `mtime` in a manifest element, keeping its other fields
    pub fn write_into(&self, fields: &mut Map<String, Value>) {
        fields.insert(NAME_FIELD.to_string(), Value::String(self.name.clone()));
        fields.insert(
            MTIME_FIELD.to_string(),
            Value::String(iso8601::format(&self.mtime)),
        );
    }

    /// The record as a manifest element
    #[must_use]
    pub fn to_entry(&self) -> Value {
        let mut fields = Map::new();
        self.write_into(&mut fields);
        Value::Object(fields)
    }
}

/// `2020-01-02T03:04:05.678Z` on write, any RFC 3339 form on read
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(mtime: &DateTime<Utc>) -> String {
        mtime.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        raw.parse::<DateTime<Utc>>().ok()
    }

    pub fn serialize<S>(mtime: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(mtime))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}
