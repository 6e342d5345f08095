// ABOUTME: HTTP health probe trait and its outcome type.
// ABOUTME: A probe never errors; every failure mode is an outcome.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Result of a single synthetic request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Answered with a status below 400.
    Healthy { status: u16 },
    /// Answered, but with an error status.
    Unhealthy { status: u16 },
    /// Connection refused, DNS failure, TLS failure and the like.
    Unreachable { reason: String },
    /// No answer within the probe timeout.
    TimedOut,
}

impl ProbeOutcome {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        if status < 400 {
            ProbeOutcome::Healthy { status }
        } else {
            ProbeOutcome::Unhealthy { status }
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy { .. })
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Healthy { status } => write!(f, "HTTP {status}"),
            ProbeOutcome::Unhealthy { status } => write!(f, "HTTP {status}"),
            ProbeOutcome::Unreachable { reason } => write!(f, "unreachable: {reason}"),
            ProbeOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Issues a GET and classifies the answer.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirects_count_as_healthy() {
        assert!(ProbeOutcome::from_status(200).is_healthy());
        assert!(ProbeOutcome::from_status(302).is_healthy());
        assert!(!ProbeOutcome::from_status(502).is_healthy());
    }

    #[test]
    fn display_is_operator_readable() {
        assert_eq!(ProbeOutcome::from_status(503).to_string(), "HTTP 503");
        assert_eq!(ProbeOutcome::TimedOut.to_string(), "timed out");
    }
}
