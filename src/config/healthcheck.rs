// ABOUTME: Application health check configuration.
// ABOUTME: Defines HTTP probe parameters with sensible defaults.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthcheckConfig {
    pub path: String,
    pub port: u16,
    pub interval: Duration,
    pub timeout: Duration,
    pub retries: u32,
    pub start_period: Duration,
}

impl Default for HealthcheckConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            port: default_port(),
            interval: default_interval(),
            timeout: default_timeout(),
            retries: default_retries(),
            start_period: default_start_period(),
        }
    }
}

impl HealthcheckConfig {
    /// Configuration that probes once with no waiting, for tests and dry environments.
    pub fn immediate() -> Self {
        Self {
            interval: Duration::ZERO,
            retries: 0,
            start_period: Duration::ZERO,
            ..Self::default()
        }
    }

    /// URL of the application's own listener, bypassing the reverse proxy.
    pub fn local_url(&self) -> String {
        format!("http://127.0.0.1:{}{}", self.port, self.path)
    }

    /// URL of the public endpoint served through the reverse proxy.
    pub fn public_url(&self, host: &str) -> String {
        format!("https://{}{}", host, self.path)
    }
}

fn default_path() -> String {
    "/".to_string()
}

fn default_port() -> u16 {
    super::DEFAULT_PORT
}

fn default_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_retries() -> u32 {
    3
}

fn default_start_period() -> Duration {
    Duration::from_secs(3)
}
