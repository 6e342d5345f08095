// ABOUTME: Test support utilities.
// ABOUTME: Provides a deploy harness wired to recording fakes over a temp checkout.

use std::path::PathBuf;
use std::sync::Once;

use gitship::config::HealthcheckConfig;
use gitship::context::DeployContext;
use gitship::deploy::{DeployError, DeployReport, pipeline};
use gitship::diagnostics::Diagnostics;
use gitship::output::{Output, OutputMode};
use gitship::tools::Collaborators;
use gitship::types::{BranchName, Revision, ServiceName};
use tempfile::TempDir;

// Each test binary only uses some of these helpers, so allow dead_code.
#[allow(dead_code)]
pub mod fakes;

use fakes::{FakeInstaller, FakeLocator, FakePermissions, FakeProbe, FakeSupervisor, FakeVcs, Journal};

/// Revision checked out before every harness deploy.
#[allow(dead_code)]
pub const ANCHOR: &str = "1111111aaaaaaa";

/// Tip of `origin/main` in every harness deploy.
#[allow(dead_code)]
pub const DEPLOYED: &str = "2222222bbbbbbb";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("gitship=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[allow(dead_code)]
pub fn revision(value: &str) -> Revision {
    Revision::parse(value).unwrap()
}

/// A temp application checkout plus one fake per collaborator, all
/// recording into the same journal.
#[allow(dead_code)]
pub struct Harness {
    pub dir: TempDir,
    pub journal: Journal,
    pub locator: FakeLocator,
    pub vcs: FakeVcs,
    pub installer: FakeInstaller,
    pub supervisor: FakeSupervisor,
    pub permissions: FakePermissions,
    pub probe: FakeProbe,
    pub branch: String,
    pub public_check: bool,
}

#[allow(dead_code)]
impl Harness {
    /// Checkout on `main` at `ANCHOR` with `origin/main` at `DEPLOYED`,
    /// a manifest, a static directory and a healthy service.
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        std::fs::create_dir_all(app.join("static")).unwrap();
        std::fs::write(app.join("requirements.txt"), "flask\n").unwrap();

        let journal = Journal::default();
        let vcs = FakeVcs::new(journal.clone(), revision(ANCHOR));
        vcs.set_remote_tip("origin/main", revision(DEPLOYED));

        Self {
            dir,
            locator: FakeLocator::default(),
            vcs,
            installer: FakeInstaller::new(journal.clone()),
            supervisor: FakeSupervisor::new(journal.clone()),
            permissions: FakePermissions::new(journal.clone()),
            probe: FakeProbe::new(journal.clone()),
            journal,
            branch: "main".to_string(),
            public_check: true,
        }
    }

    pub fn app_dir(&self) -> PathBuf {
        self.dir.path().join("app")
    }

    pub fn history_path(&self) -> PathBuf {
        self.app_dir().join("deploy-history.log")
    }

    pub fn context(&self) -> DeployContext {
        DeployContext::new(
            self.app_dir(),
            BranchName::new(&self.branch).unwrap(),
            ServiceName::new("asset-capture").unwrap(),
        )
        .healthcheck(HealthcheckConfig::immediate())
        .public_check(self.public_check)
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            locator: Box::new(self.locator.clone()),
            vcs: Box::new(self.vcs.clone()),
            installer: Box::new(self.installer.clone()),
            supervisor: Box::new(self.supervisor.clone()),
            permissions: Box::new(self.permissions.clone()),
            probe: Box::new(self.probe.clone()),
        }
    }

    /// Run the full pipeline once.
    pub async fn deploy(&self) -> (Result<DeployReport, DeployError>, Diagnostics) {
        self.deploy_with(&Output::new(OutputMode::Quiet)).await
    }

    /// Run the full pipeline once, narrating to `output`.
    pub async fn deploy_with(
        &self,
        output: &Output,
    ) -> (Result<DeployReport, DeployError>, Diagnostics) {
        let mut diag = Diagnostics::default();
        let result = pipeline::run(self.context(), &self.collaborators(), output, &mut diag).await;
        (result, diag)
    }

    /// Journal entries that change the host.
    pub fn mutations(&self) -> Vec<String> {
        self.journal
            .entries()
            .into_iter()
            .filter(|e| !e.starts_with("git rev-parse") && !e.starts_with("probe"))
            .collect()
    }
}
