// ABOUTME: Diagnostics accumulator for non-fatal warnings during deployment.
// ABOUTME: Collects warnings that shouldn't fail a deployment but should be shown to users.

use serde::Serialize;

/// Collects non-fatal warnings during deployment operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether a warning of this kind was recorded.
    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// A non-fatal warning collected during deployment.
#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a dependency provisioning warning.
    pub fn provisioning(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Provisioning,
            message: message.into(),
        }
    }

    /// Create a permission reconciliation warning.
    pub fn permission(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Permission,
            message: message.into(),
        }
    }

    /// Create a public endpoint health warning.
    pub fn public_health(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::PublicHealth,
            message: message.into(),
        }
    }

    /// Create a checkout restoration warning.
    pub fn checkout_restore(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::CheckoutRestore,
            message: message.into(),
        }
    }

    /// Create a history log warning.
    pub fn history(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::History,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Environment creation or package installation failed.
    Provisioning,
    /// An ACL grant could not be applied.
    Permission,
    /// The public HTTPS endpoint did not answer healthily.
    PublicHealth,
    /// The checkout could not be put back after a failed sync.
    CheckoutRestore,
    /// The deploy record could not be appended.
    History,
}
