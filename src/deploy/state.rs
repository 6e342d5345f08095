// ABOUTME: Deployment state marker types for the type state pattern.
// ABOUTME: Later states carry the anchor and deployed revisions they depend on.

use serde::Serialize;

use crate::history::DeployRecord;
use crate::types::Revision;

/// The revision the run started from and the one it moved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revisions {
    /// Checked out before any change; the rollback target.
    pub anchor: Revision,
    /// Checked out after the sync.
    pub deployed: Revision,
}

/// Initial state: nothing inspected yet.
/// Available actions: `preflight()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Preflight passed: tools present, directory is a checkout.
/// Available actions: `capture_anchor()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Preflighted;

/// Anchor captured: the pre-deploy revision is known.
/// Available actions: `sync()`
#[derive(Debug, Clone)]
pub struct Anchored {
    pub(crate) anchor: Revision,
}

/// Source aligned to the remote branch tip.
/// Available actions: `provision()`, `rollback()`
#[derive(Debug, Clone)]
pub struct Synced {
    pub(crate) revisions: Revisions,
}

/// Dependencies provisioned (possibly with warnings).
/// Available actions: `reconcile_permissions()`, `rollback()`
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub(crate) revisions: Revisions,
}

/// Web server read access reconciled (possibly with warnings).
/// Available actions: `activate()`, `rollback()`
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub(crate) revisions: Revisions,
}

/// Service reloaded or restarted on the new code.
/// Available actions: `verify_local()`, `rollback()`
#[derive(Debug, Clone)]
pub struct Activated {
    pub(crate) revisions: Revisions,
}

/// Local health confirmed. No rollback past this point.
/// Available actions: `verify_public()`, `record()`
#[derive(Debug, Clone)]
pub struct Verified {
    pub(crate) revisions: Revisions,
}

/// Deploy finished; the record is absent if the history append failed.
/// Available actions: `into_report()`
#[derive(Debug, Clone)]
pub struct Completed {
    pub(crate) revisions: Revisions,
    pub(crate) record: Option<DeployRecord>,
}

/// Source reset to the anchor and the service restarted.
#[derive(Debug, Clone)]
pub struct RolledBack {
    pub(crate) anchor: Revision,
}

/// States from which the run can be undone by returning to the anchor.
pub trait Rollbackable: sealed::Sealed {
    fn revisions(&self) -> &Revisions;
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Synced {}
    impl Sealed for super::Provisioned {}
    impl Sealed for super::Reconciled {}
    impl Sealed for super::Activated {}
}

impl Rollbackable for Synced {
    fn revisions(&self) -> &Revisions {
        &self.revisions
    }
}

impl Rollbackable for Provisioned {
    fn revisions(&self) -> &Revisions {
        &self.revisions
    }
}

impl Rollbackable for Reconciled {
    fn revisions(&self) -> &Revisions {
        &self.revisions
    }
}

impl Rollbackable for Activated {
    fn revisions(&self) -> &Revisions {
        &self.revisions
    }
}
