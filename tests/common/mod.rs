//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Request bodies captured by the mock collector.
pub type CapturedBodies = Arc<Mutex<Vec<String>>>;

/// Start a mock collection endpoint that records every POSTed body and
/// answers `200 OK`. Returns the bound address and the capture sink.
pub async fn start_mock_collector() -> (SocketAddr, CapturedBodies) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: CapturedBodies = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let sink = sink.clone();
                    tokio::spawn(async move {
                        let mut raw = Vec::new();
                        let mut chunk = [0u8; 4096];
                        loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    raw.extend_from_slice(&chunk[..n]);
                                    if let Some(body) = extract_body(&raw) {
                                        sink.lock().unwrap().push(body);
                                        let _ = socket
                                            .write_all(
                                                b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                                            )
                                            .await;
                                        let _ = socket.shutdown().await;
                                        break;
                                    }
                                }
                                Err(_) => break,
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captured)
}

/// Start a collector that accepts connections but never responds, to make
/// deliveries hang until their timeout.
#[allow(dead_code)]
pub async fn start_stalled_collector() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_secs(5)).await;
                        drop(socket);
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An endpoint URL nothing listens on: the listener is bound, its address
/// taken, then dropped.
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/track")
}

/// Pull the body out of a raw HTTP/1.1 request once Content-Length bytes
/// have arrived.
fn extract_body(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let header_end = text.find("\r\n\r\n")?;

    let content_length: usize = text[..header_end].lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })?;

    let body = &text[header_end + 4..];
    if body.len() >= content_length {
        Some(body[..content_length].to_string())
    } else {
        None
    }
}

/// Wait until the sink holds at least `count` bodies, up to a deadline.
pub async fn wait_for_bodies(captured: &CapturedBodies, count: usize) -> Vec<String> {
    for _ in 0..100 {
        {
            let bodies = captured.lock().unwrap();
            if bodies.len() >= count {
                return bodies.clone();
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    captured.lock().unwrap().clone()
}
