// ABOUTME: Integration tests for the HTTP health probe against real sockets.
// ABOUTME: Serves canned statuses with hyper and checks refused and stalled peers.

mod support;

use bytes::Bytes;
use gitship::tools::command::CommandRunner;
use gitship::tools::system::HttpClient;
use gitship::tools::{HttpProbe, ProbeOutcome};
use http_body_util::Full;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve every request on a fresh local port with `status`.
async fn serve_status(status: StatusCode) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let service = service_fn(move |_req: Request<hyper::body::Incoming>| async move {
                    let mut resp = Response::new(Full::new(Bytes::from_static(b"ok")));
                    *resp.status_mut() = status;
                    Ok::<_, Infallible>(resp)
                });
                let _ = hyper::server::conn::http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    port
}

fn client() -> HttpClient {
    HttpClient::new(CommandRunner::without_sudo())
}

#[tokio::test]
async fn success_status_is_healthy() {
    support::init_tracing();
    let port = serve_status(StatusCode::OK).await;

    let outcome = client()
        .probe(&format!("http://127.0.0.1:{port}/"), Duration::from_secs(5))
        .await;

    assert_eq!(outcome, ProbeOutcome::Healthy { status: 200 });
}

#[tokio::test]
async fn redirect_is_healthy() {
    let port = serve_status(StatusCode::FOUND).await;

    let outcome = client()
        .probe(&format!("http://127.0.0.1:{port}/"), Duration::from_secs(5))
        .await;

    assert!(outcome.is_healthy());
}

#[tokio::test]
async fn server_error_is_unhealthy() {
    let port = serve_status(StatusCode::BAD_GATEWAY).await;

    let outcome = client()
        .probe(&format!("http://127.0.0.1:{port}/"), Duration::from_secs(5))
        .await;

    assert_eq!(outcome, ProbeOutcome::Unhealthy { status: 502 });
}

#[tokio::test]
async fn refused_connection_is_unreachable() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };

    let outcome = client()
        .probe(&format!("http://127.0.0.1:{port}/"), Duration::from_secs(5))
        .await;

    assert!(matches!(outcome, ProbeOutcome::Unreachable { .. }), "{outcome:?}");
}

#[tokio::test]
async fn silent_peer_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        // Accept and hold connections without answering
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let outcome = client()
        .probe(
            &format!("http://127.0.0.1:{port}/"),
            Duration::from_millis(200),
        )
        .await;

    assert_eq!(outcome, ProbeOutcome::TimedOut);
}
