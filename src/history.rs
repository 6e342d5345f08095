// ABOUTME: Append-only deploy history stored as a YAML document stream.
// ABOUTME: One document per successful deploy; never rewritten or truncated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::{BranchName, Revision};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode deploy record: {0}")]
    Encode(#[source] serde_yaml::Error),

    #[error("corrupt history entry {index} in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        index: usize,
        source: serde_yaml::Error,
    },
}

/// One successful deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployRecord {
    pub timestamp: DateTime<Utc>,
    pub branch: BranchName,
    pub commit: Revision,
    pub operator: String,
}

impl DeployRecord {
    /// Record a deploy that happened just now.
    pub fn now(branch: BranchName, commit: Revision, operator: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            branch,
            commit,
            operator: operator.into(),
        }
    }
}

/// The history file for one application checkout.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as its own YAML document.
    pub fn append(&self, record: &DeployRecord) -> Result<(), HistoryError> {
        let body = serde_yaml::to_string(record).map_err(HistoryError::Encode)?;
        let entry = format!("---\n{body}");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| HistoryError::Write {
                path: self.path.clone(),
                source,
            })?;

        file.write_all(entry.as_bytes())
            .map_err(|source| HistoryError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(path = %self.path.display(), commit = %record.commit, "deploy recorded");
        Ok(())
    }

    /// Every record, oldest first. A missing file is an empty history.
    pub fn read_all(&self) -> Result<Vec<DeployRecord>, HistoryError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_yaml::Deserializer::from_str(&text)
            .enumerate()
            .filter_map(|(index, document)| {
                // Empty documents (truncated log, stray `---`) carry no record.
                match Option::<DeployRecord>::deserialize(document) {
                    Ok(record) => record.map(Ok),
                    Err(source) => Some(Err(HistoryError::Corrupt {
                        path: self.path.clone(),
                        index,
                        source,
                    })),
                }
            })
            .collect()
    }

    /// The newest `count` records, oldest first.
    pub fn recent(&self, count: usize) -> Result<Vec<DeployRecord>, HistoryError> {
        let mut records = self.read_all()?;
        let skip = records.len().saturating_sub(count);
        Ok(records.split_off(skip))
    }
}

/// Who is deploying: the invoking user (seen through sudo) at this host.
pub fn operator_identity() -> String {
    let user = ["SUDO_USER", "USER", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    let host = gethostname::gethostname().to_string_lossy().into_owned();
    format!("{user}@{host}")
}
