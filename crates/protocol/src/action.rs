//! The action tag carried by every request envelope.
//!
//! On the wire an [`Action`] is its quoted name (`"Append"`, `"Read"`, ...),
//! never an integer. Names are resolved through one fixed table, [`NAMES`],
//! used in both directions.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Which of the four remote operations a [`crate::Request`] asks for.
///
/// The default value is [`Action::Append`]. Decoding an unrecognised name from
/// JSON yields this default rather than failing; use [`Action::from_str`] when
/// a strict parse is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// Append one fact to an entity stream.
    #[default]
    Append,
    /// Read a page of facts after a cursor.
    Read,
    /// Fetch the most recently appended fact.
    Tail,
    /// List the entity names under an aggregate.
    Scan,
}

/// Canonical wire names, indexed both ways.
const NAMES: [(Action, &str); 4] = [
    (Action::Append, "Append"),
    (Action::Read, "Read"),
    (Action::Tail, "Tail"),
    (Action::Scan, "Scan"),
];

impl Action {
    /// Every defined action, in declaration order.
    pub const ALL: [Action; 4] = [Action::Append, Action::Read, Action::Tail, Action::Scan];

    /// Returns the canonical wire name of this action.
    pub fn as_str(self) -> &'static str {
        NAMES
            .iter()
            .find_map(|(action, name)| (*action == self).then_some(*name))
            .unwrap_or_default()
    }

    /// Resolves a wire name, falling back to [`Action::default`] when the name
    /// is not recognised.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by the strict [`Action::from_str`] parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown action: '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find_map(|(action, name)| (*name == s).then_some(*action))
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Action::from_name_lossy(&name))
    }
}
