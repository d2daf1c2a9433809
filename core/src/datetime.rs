//! Millisecond epoch timestamps as they appear in Brewfather documents.

use std::fmt;

use chrono::{SecondsFormat, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An instant decoded from a Unix-millisecond JSON integer.
///
/// Sub-second precision is dropped on decode: `1600000000999` and
/// `1600000000000` become the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(chrono::DateTime<Utc>);

impl DateTime {
    /// Build from epoch milliseconds, truncating toward zero to whole seconds.
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_opt(millis / 1000, 0).single().map(Self)
    }

    pub fn time(&self) -> chrono::DateTime<Utc> {
        self.0
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0.timestamp() * 1000)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_i64(MillisVisitor)
    }
}

struct MillisVisitor;

impl Visitor<'_> for MillisVisitor {
    type Value = DateTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer of milliseconds since the Unix epoch")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DateTime, E> {
        DateTime::from_millis(v)
            .ok_or_else(|| E::custom(format_args!("timestamp {v} is out of range")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DateTime, E> {
        let v = i64::try_from(v)
            .map_err(|_| E::custom(format_args!("timestamp {v} is out of range")))?;
        self.visit_i64(v)
    }
}
