//! Object identifiers for downstream resources.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Length of an object id in hex characters.
const OBJECT_ID_LEN: usize = 24;

/// Identifier for a resource owned by the downstream file service
/// (users, files, tasks, folders).
///
/// The downstream service identifies everything with 24-hex-character
/// object ids. Parsing is the only way to construct one, so a held
/// `ObjectId` is always well-formed and safe to splice into a request path.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse from a string, validating the 24-hex-character format.
    pub fn parse(s: &str) -> crate::Result<Self> {
        if s.len() == OBJECT_ID_LEN && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(crate::Error::InvalidObjectId(s.to_string()))
        }
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
