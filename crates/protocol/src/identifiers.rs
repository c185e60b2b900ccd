//! Fact identity and time.
//!
//! A [`FactId`] is a 128-bit ULID: its 48-bit millisecond prefix makes ids
//! monotonic per stream, and its 26-character Crockford base32 text form
//! sorts lexicographically in the same order. Ordering of facts within an
//! entity stream derives from this id.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identifies one fact within an entity stream.
///
/// Also used as a read cursor: passing a fact's id as `origin` reads the facts
/// appended after it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FactId(Ulid);

impl FactId {
    /// Creates a [`FactId`] from an existing ULID.
    pub fn from_ulid(id: Ulid) -> Self {
        Self(id)
    }

    /// Creates a [`FactId`] from its raw 128-bit value.
    pub fn from_u128(value: u128) -> Self {
        Self(Ulid(value))
    }

    /// Returns the underlying [`Ulid`].
    pub fn as_ulid(self) -> Ulid {
        self.0
    }

    /// Returns the raw 128-bit value.
    pub fn as_u128(self) -> u128 {
        self.0 .0
    }

    /// Millisecond Unix time encoded in the id's prefix.
    pub fn timestamp_ms(self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl FromStr for FactId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

impl std::fmt::Display for FactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// When the service recorded a fact.
///
/// Only ever decoded from a response; the client never stamps facts itself.
/// Displayed in the RFC 3339 form the service sends (`...Z`, with as many
/// fractional digits as needed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Milliseconds since the Unix epoch, comparable with
    /// [`FactId::timestamp_ms`].
    pub fn timestamp_ms(self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}
