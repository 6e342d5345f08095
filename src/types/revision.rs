// ABOUTME: Validated commit identifiers for the checkout being deployed.
// ABOUTME: Used for the rollback anchor and the revision a deploy lands on.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Minimum length git accepts for an abbreviated object name.
const MIN_LEN: usize = 4;

/// SHA-256 object names are 64 hex digits.
const MAX_LEN: usize = 64;

const SHORT_LEN: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevisionError {
    #[error("revision cannot be empty")]
    Empty,

    #[error("revision must be between {MIN_LEN} and {MAX_LEN} characters, got {0}")]
    BadLength(usize),

    #[error("invalid character in revision: '{0}'")]
    InvalidChar(char),
}

/// An immutable reference to one exact state of the source tree.
#[must_use = "revisions anchor rollbacks and should not be ignored"]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    /// Parse a revision from git output, trimming surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, RevisionError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(RevisionError::Empty);
        }

        if value.len() < MIN_LEN || value.len() > MAX_LEN {
            return Err(RevisionError::BadLength(value.len()));
        }

        if let Some(c) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(RevisionError::InvalidChar(c));
        }

        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for operator-facing messages.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(SHORT_LEN)]
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Revision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Revision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Revision::parse(&value).map_err(serde::de::Error::custom)
    }
}
