//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use health_mesh::config::{MeshConfig, PeerConfig};
use health_mesh::health::RegionalClock;
use health_mesh::{MeshServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const OWNER: &str = "202300653";

/// Read until the end of the request head so the client is never reset mid-write.
#[allow(dead_code)]
async fn read_request_head(socket: &mut TcpStream) {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 512];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    return;
                }
            }
        }
    }
}

/// Start a mock peer that answers every request with `status` and `body`.
#[allow(dead_code)]
pub async fn start_mock_peer(status: u16, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        read_request_head(&mut socket).await;
                        let status_text = match status {
                            200 => "200 OK",
                            204 => "204 No Content",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a peer that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_silent_peer() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn peer(name: &str, vm: &str, addr: SocketAddr) -> PeerConfig {
    PeerConfig {
        name: name.to_string(),
        vm: vm.to_string(),
        address: addr.to_string(),
        host_env: None,
    }
}

pub fn node_config(name: &str, vm: &str, peers: Vec<PeerConfig>) -> MeshConfig {
    let mut config = MeshConfig::default();
    config.node.name = name.to_string();
    config.node.vm = vm.to_string();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.peers = peers;
    config
}

/// Serve `config` on an already-bound listener.
pub async fn serve_on(listener: TcpListener, config: MeshConfig, shutdown: &Shutdown) {
    let clock = RegionalClock::load(&config.clock.timezone).unwrap();
    let server = MeshServer::new(config, clock);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// Bind an ephemeral port and serve `config` on it.
pub async fn start_node(config: MeshConfig, shutdown: &Shutdown) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    serve_on(listener, config, shutdown).await;
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
