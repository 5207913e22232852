//! Custom serialization for Record to handle the document format.
//!
//! ## Write Format (Serialization)
//!
//! Only the fields are written, sorted by name: `{"name": "Kevin", ...}`.
//! System attributes are owned by the store and never sent back.
//!
//! ## Read Format (Deserialization)
//!
//! - `$id`, `$collectionId`, `$createdAt`, `$updatedAt` go to the record metadata
//! - Other `$`-prefixed attributes (`$permissions`, `$databaseId`) are skipped
//! - Everything else becomes a field

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

// =============================================================================
// Serialization (for writes)
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;

        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort_unstable();
        for key in keys {
            map.serialize_entry(key, &self.fields[key])?;
        }

        map.end()
    }
}

// =============================================================================
// Deserialization (from reads)
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a document")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;

            match key.as_str() {
                "$id" => {
                    if let serde_json::Value::String(s) = value {
                        record.id = Some(s);
                    }
                }
                "$collectionId" => {
                    if let serde_json::Value::String(s) = value {
                        record.collection = Some(s);
                    }
                }
                "$createdAt" => record.created_at = parse_timestamp(&value),
                "$updatedAt" => record.updated_at = parse_timestamp(&value),
                other if other.starts_with('$') => {
                    // Skip other system attributes
                }
                _ => {
                    record.fields.insert(key, Value::from(value));
                }
            }
        }

        Ok(record)
    }
}

fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
