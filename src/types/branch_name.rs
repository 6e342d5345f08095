// ABOUTME: Branch name validation for the deploy target.
// ABOUTME: Rejects names git would refuse before any command is run.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BranchNameError {
    #[error("branch name cannot be empty")]
    Empty,

    #[error("branch name cannot start with '{0}'")]
    BadStart(char),

    #[error("branch name cannot end with '{0}'")]
    BadEnd(&'static str),

    #[error("branch name cannot contain '..'")]
    DoubleDot,

    #[error("invalid character in branch name: {0:?}")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    pub fn new(value: &str) -> Result<Self, BranchNameError> {
        if value.is_empty() {
            return Err(BranchNameError::Empty);
        }

        if let Some(c) = value.chars().next()
            && (c == '-' || c == '/')
        {
            return Err(BranchNameError::BadStart(c));
        }

        if value.ends_with('/') {
            return Err(BranchNameError::BadEnd("/"));
        }

        if value.ends_with(".lock") {
            return Err(BranchNameError::BadEnd(".lock"));
        }

        if value.contains("..") {
            return Err(BranchNameError::DoubleDot);
        }

        for c in value.chars() {
            if c.is_whitespace() || c.is_control() || "~^:?*[\\".contains(c) {
                return Err(BranchNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The remote-tracking ref this branch is aligned to, e.g. `origin/main`.
    pub fn remote_ref(&self, remote: &str) -> String {
        format!("{}/{}", remote, self.0)
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BranchName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BranchName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        BranchName::new(&value).map_err(serde::de::Error::custom)
    }
}
