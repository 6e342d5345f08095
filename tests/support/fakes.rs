// ABOUTME: In-memory collaborators that record every call in a shared journal.
// ABOUTME: Failures are switched on per operation so tests can script each scenario.

use async_trait::async_trait;
use gitship::tools::{
    AclGrant, HttpProbe, PackageInstaller, PermissionManager, ProbeOutcome, ServiceSupervisor,
    ToolError, ToolLocator, VersionControl,
};
use gitship::types::{BranchName, Revision, ServiceName};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Ordered record of every collaborator call.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.0.lock().iter().position(|e| e == entry)
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.position(entry).is_some()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.0.lock().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

// =============================================================================
// Locator
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct FakeLocator {
    missing: Arc<Mutex<HashSet<String>>>,
}

impl FakeLocator {
    pub fn remove(&self, program: &str) {
        self.missing.lock().insert(program.to_string());
    }
}

#[async_trait]
impl ToolLocator for FakeLocator {
    async fn locate(&self, program: &str) -> Option<PathBuf> {
        if self.missing.lock().contains(program) {
            None
        } else {
            Some(PathBuf::from("/usr/bin").join(program))
        }
    }
}

// =============================================================================
// Version control
// =============================================================================

#[derive(Debug)]
pub struct VcsState {
    pub repository: bool,
    pub head: Revision,
    pub branch: String,
    pub local_branches: HashSet<String>,
    pub remote_tips: HashMap<String, Revision>,
    /// Journal entries that should fail, e.g. `git fetch --all --prune`.
    pub failing: HashSet<String>,
}

#[derive(Debug, Clone)]
pub struct FakeVcs {
    journal: Journal,
    state: Arc<Mutex<VcsState>>,
}

impl FakeVcs {
    pub fn new(journal: Journal, head: Revision) -> Self {
        Self {
            journal,
            state: Arc::new(Mutex::new(VcsState {
                repository: true,
                head,
                branch: "main".to_string(),
                local_branches: HashSet::from(["main".to_string()]),
                remote_tips: HashMap::new(),
                failing: HashSet::new(),
            })),
        }
    }

    pub fn set_remote_tip(&self, remote_ref: &str, tip: Revision) {
        self.state.lock().remote_tips.insert(remote_ref.to_string(), tip);
    }

    pub fn fail(&self, entry: &str) {
        self.state.lock().failing.insert(entry.to_string());
    }

    pub fn not_a_repository(&self) {
        self.state.lock().repository = false;
    }

    pub fn forget_local_branch(&self, branch: &str) {
        self.state.lock().local_branches.remove(branch);
    }

    pub fn head(&self) -> Revision {
        self.state.lock().head.clone()
    }

    pub fn branch(&self) -> String {
        self.state.lock().branch.clone()
    }

    fn call(&self, entry: String) -> Result<(), ToolError> {
        self.journal.push(entry.clone());
        if self.state.lock().failing.contains(&entry) {
            Err(ToolError::failed(entry, "simulated failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VersionControl for FakeVcs {
    async fn is_repository(&self, _dir: &Path) -> bool {
        self.state.lock().repository
    }

    async fn current_revision(&self, _dir: &Path) -> Result<Revision, ToolError> {
        self.call("git rev-parse HEAD".to_string())?;
        Ok(self.head())
    }

    async fn fetch_all(&self, _dir: &Path) -> Result<(), ToolError> {
        self.call("git fetch --all --prune".to_string())
    }

    async fn local_branch_exists(
        &self,
        _dir: &Path,
        branch: &BranchName,
    ) -> Result<bool, ToolError> {
        self.call(format!("git show-ref refs/heads/{branch}"))?;
        Ok(self.state.lock().local_branches.contains(branch.as_str()))
    }

    async fn checkout(&self, _dir: &Path, branch: &BranchName) -> Result<(), ToolError> {
        self.call(format!("git checkout {branch}"))?;
        self.state.lock().branch = branch.to_string();
        Ok(())
    }

    async fn checkout_tracking(
        &self,
        _dir: &Path,
        branch: &BranchName,
        upstream: &str,
    ) -> Result<(), ToolError> {
        self.call(format!("git checkout -b {branch} --track {upstream}"))?;
        let mut state = self.state.lock();
        state.local_branches.insert(branch.to_string());
        state.branch = branch.to_string();
        Ok(())
    }

    async fn reset_hard(&self, _dir: &Path, target: &str) -> Result<(), ToolError> {
        self.call(format!("git reset --hard {target}"))?;
        let mut state = self.state.lock();
        let revision = match state.remote_tips.get(target) {
            Some(tip) => tip.clone(),
            None => Revision::parse(target)
                .map_err(|e| ToolError::failed(format!("git reset --hard {target}"), e.to_string()))?,
        };
        state.head = revision;
        Ok(())
    }
}

// =============================================================================
// Package installer
// =============================================================================

#[derive(Debug, Clone)]
pub struct FakeInstaller {
    journal: Journal,
    exists: Arc<Mutex<bool>>,
    failing: Arc<Mutex<HashSet<&'static str>>>,
}

impl FakeInstaller {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            exists: Arc::new(Mutex::new(true)),
            failing: Arc::default(),
        }
    }

    pub fn without_environment(&self) {
        *self.exists.lock() = false;
    }

    /// One of `create`, `upgrade`, `install`.
    pub fn fail(&self, step: &'static str) {
        self.failing.lock().insert(step);
    }

    fn call(&self, step: &'static str) -> Result<(), ToolError> {
        self.journal.push(format!("pip {step}"));
        if self.failing.lock().contains(step) {
            Err(ToolError::failed(format!("pip {step}"), "simulated failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PackageInstaller for FakeInstaller {
    async fn environment_exists(&self, _env: &Path) -> bool {
        *self.exists.lock()
    }

    async fn create_environment(&self, _env: &Path) -> Result<(), ToolError> {
        self.call("create")?;
        *self.exists.lock() = true;
        Ok(())
    }

    async fn upgrade_installer(&self, _env: &Path) -> Result<(), ToolError> {
        self.call("upgrade")
    }

    async fn install_manifest(&self, _env: &Path, _manifest: &Path) -> Result<(), ToolError> {
        self.call("install")
    }
}

// =============================================================================
// Service supervisor
// =============================================================================

#[derive(Debug, Clone)]
pub struct FakeSupervisor {
    journal: Journal,
    reload_fails: Arc<Mutex<bool>>,
    restart_failures: Arc<Mutex<usize>>,
}

impl FakeSupervisor {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            reload_fails: Arc::default(),
            restart_failures: Arc::default(),
        }
    }

    pub fn fail_reload(&self) {
        *self.reload_fails.lock() = true;
    }

    /// Make the next `count` restarts fail.
    pub fn fail_restarts(&self, count: usize) {
        *self.restart_failures.lock() = count;
    }
}

#[async_trait]
impl ServiceSupervisor for FakeSupervisor {
    async fn reload(&self, service: &ServiceName) -> Result<(), ToolError> {
        let entry = format!("systemctl reload {service}");
        self.journal.push(entry.clone());
        if *self.reload_fails.lock() {
            return Err(ToolError::failed(entry, "Job for unit failed"));
        }
        Ok(())
    }

    async fn restart(&self, service: &ServiceName) -> Result<(), ToolError> {
        let entry = format!("systemctl restart {service}");
        self.journal.push(entry.clone());
        let mut remaining = self.restart_failures.lock();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(ToolError::failed(entry, "Job for unit failed"));
        }
        Ok(())
    }
}

// =============================================================================
// Permissions
// =============================================================================

#[derive(Debug, Clone)]
pub struct FakePermissions {
    journal: Journal,
    acl: Arc<Mutex<HashSet<(PathBuf, AclGrant)>>>,
    failing: Arc<Mutex<HashSet<PathBuf>>>,
}

impl FakePermissions {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            acl: Arc::default(),
            failing: Arc::default(),
        }
    }

    pub fn fail_on(&self, path: impl Into<PathBuf>) {
        self.failing.lock().insert(path.into());
    }

    /// Effective ACL entries, as a set.
    pub fn entries(&self) -> HashSet<(PathBuf, AclGrant)> {
        self.acl.lock().clone()
    }
}

#[async_trait]
impl PermissionManager for FakePermissions {
    async fn grant(&self, path: &Path, grant: &AclGrant) -> Result<(), ToolError> {
        let entry = format!("setfacl {grant} {}", path.display());
        self.journal.push(entry.clone());
        if self.failing.lock().contains(path) {
            return Err(ToolError::failed(entry, "sudo: a password is required"));
        }
        self.acl.lock().insert((path.to_path_buf(), grant.clone()));
        Ok(())
    }
}

// =============================================================================
// Probe
// =============================================================================

/// Answers local probes from a script (last answer repeats) and public
/// probes with a fixed outcome.
#[derive(Debug, Clone)]
pub struct FakeProbe {
    journal: Journal,
    local: Arc<Mutex<VecDeque<ProbeOutcome>>>,
    public: Arc<Mutex<ProbeOutcome>>,
}

impl FakeProbe {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            local: Arc::new(Mutex::new(VecDeque::from([ProbeOutcome::Healthy {
                status: 200,
            }]))),
            public: Arc::new(Mutex::new(ProbeOutcome::Healthy { status: 200 })),
        }
    }

    pub fn script_local(&self, outcomes: impl IntoIterator<Item = ProbeOutcome>) {
        *self.local.lock() = outcomes.into_iter().collect();
    }

    pub fn set_public(&self, outcome: ProbeOutcome) {
        *self.public.lock() = outcome;
    }
}

#[async_trait]
impl HttpProbe for FakeProbe {
    async fn probe(&self, url: &str, _timeout: Duration) -> ProbeOutcome {
        self.journal.push(format!("probe {url}"));
        if url.starts_with("https://") {
            return self.public.lock().clone();
        }
        let mut script = self.local.lock();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script
                .front()
                .cloned()
                .unwrap_or(ProbeOutcome::Unreachable {
                    reason: "connection refused".to_string(),
                })
        }
    }
}
