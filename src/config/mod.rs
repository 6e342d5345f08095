// ABOUTME: Fixed deployment defaults for the managed application.
// ABOUTME: Paths, names and probe settings that CLI flags may override.

mod healthcheck;
mod tools;

pub use healthcheck::HealthcheckConfig;
pub use tools::{GIT, PYTHON, REQUIRED_TOOLS, RequiredTool};

/// Branch deployed when none is given on the command line.
pub const DEFAULT_BRANCH: &str = "main";

/// Public hostname probed through the reverse proxy.
pub const DEFAULT_HEALTH_HOST: &str = "app.example.com";

/// Checkout of the application on this host.
pub const DEFAULT_APP_DIR: &str = "/srv/asset-capture";

/// systemd unit running the application server.
pub const DEFAULT_SERVICE: &str = "asset-capture";

/// Port the application server listens on locally.
pub const DEFAULT_PORT: u16 = 8000;

/// Records shown by `--history` when no count is given.
pub const DEFAULT_HISTORY_COUNT: usize = 10;

/// Remote whose branch tip the checkout is aligned to.
pub const DEFAULT_REMOTE: &str = "origin";

/// Identity the web server reads files as.
pub const DEFAULT_WEB_USER: &str = "www-data";

/// Isolated interpreter environment, relative to the app directory.
pub const VENV_DIR: &str = "venv";

/// Dependency manifest, relative to the app directory.
pub const MANIFEST_FILE: &str = "requirements.txt";

/// Static asset subtree served directly by the web server.
pub const STATIC_DIR: &str = "static";

/// Append-only deploy history, relative to the app directory.
pub const HISTORY_FILE: &str = "deploy-history.log";
