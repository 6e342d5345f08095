// ABOUTME: HttpProbe implementation for local and public endpoints.
// ABOUTME: Plain HTTP is spoken in-process with hyper; HTTPS is delegated to curl.

use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper::Uri;
use hyper_util::rt::TokioIo;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::tools::command::{CommandRunner, Privilege, args};
use crate::tools::{HttpProbe, ProbeOutcome};

/// curl's exit code for "operation timed out".
const CURL_TIMEOUT_EXIT: i32 = 28;

/// Health probe client.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    runner: CommandRunner,
}

impl HttpClient {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    async fn probe_tls(&self, url: &str, timeout: Duration) -> ProbeOutcome {
        let max_time = format!("{:.1}", timeout.as_secs_f64().max(1.0));
        let argv = args([
            "-sS",
            "-o",
            "/dev/null",
            "-w",
            "%{http_code}",
            "--max-time",
            max_time.as_str(),
            url,
        ]);

        let output = match self.runner.output("curl", &argv, None, Privilege::User).await {
            Ok(output) => output,
            Err(e) => {
                return ProbeOutcome::Unreachable {
                    reason: e.to_string(),
                };
            }
        };

        match output.exit_code {
            Some(0) => match output.stdout.trim().parse::<u16>() {
                Ok(status) if status > 0 => ProbeOutcome::from_status(status),
                _ => ProbeOutcome::Unreachable {
                    reason: format!("no HTTP status from curl: {:?}", output.stdout.trim()),
                },
            },
            Some(CURL_TIMEOUT_EXIT) => ProbeOutcome::TimedOut,
            _ => ProbeOutcome::Unreachable {
                reason: output.stderr.trim().to_string(),
            },
        }
    }
}

#[async_trait]
impl HttpProbe for HttpClient {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeOutcome {
        let uri: Uri = match url.parse() {
            Ok(uri) => uri,
            Err(e) => {
                return ProbeOutcome::Unreachable {
                    reason: format!("invalid URL {url}: {e}"),
                };
            }
        };

        let outcome = match uri.scheme_str() {
            Some("http") => match tokio::time::timeout(timeout, get_plain(&uri)).await {
                Ok(Ok(status)) => ProbeOutcome::from_status(status),
                Ok(Err(reason)) => ProbeOutcome::Unreachable { reason },
                Err(_elapsed) => ProbeOutcome::TimedOut,
            },
            Some("https") => self.probe_tls(url, timeout).await,
            other => ProbeOutcome::Unreachable {
                reason: format!("unsupported URL scheme: {:?}", other),
            },
        };

        tracing::debug!(url, %outcome, "probe finished");
        outcome
    }
}

/// Issue a single GET over a fresh HTTP/1 connection and return the status.
async fn get_plain(uri: &Uri) -> Result<u16, String> {
    let host = uri.host().ok_or("URL has no host")?;
    let port = uri.port_u16().unwrap_or(80);

    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|e| format!("connect to {}:{} failed: {}", host, port, e))?;

    let io = TokioIo::new(stream);

    let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(|e| format!("HTTP handshake failed: {}", e))?;

    tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::debug!("probe connection error: {}", e);
        }
    });

    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
    let authority = uri.authority().map(|a| a.as_str()).unwrap_or(host);

    let req = hyper::Request::builder()
        .method("GET")
        .uri(path)
        .header("Host", authority)
        .header("User-Agent", concat!("gitship/", env!("CARGO_PKG_VERSION")))
        .body(http_body_util::Empty::<bytes::Bytes>::new())
        .map_err(|e| format!("failed to build request: {}", e))?;

    let resp = sender
        .send_request(req)
        .await
        .map_err(|e| format!("request failed: {}", e))?;

    let status = resp.status().as_u16();

    // Drain the body so the server sees a complete exchange
    let _ = resp.into_body().collect().await;

    Ok(status)
}
