//! Shared utilities for integration testing against a mock exchange node.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use alloy::primitives::hex;
use exchange_client::ExchangeConfig;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const ACCOUNT: &str = "jpgWGpfHz8GxqUjz5nb6ej8eZJQtiF6KhH";
pub const SECRET: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DESTINATION: &str = "jEaAWgAxr8fcVSNNeKprbD7UK4JUxnCn9C";

/// Hex length of the 65-byte signature trailing every blob.
const SIGNATURE_HEX_LEN: usize = 130;

/// One request as seen by the mock node.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl MockRequest {
    pub fn is_submission(&self) -> bool {
        self.path.starts_with("/exchange/sign_")
    }

    /// Value of the `sign` form field.
    pub fn sign(&self) -> Option<&str> {
        self.body
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "sign")
            .map(|(_, value)| value)
    }

    /// Sequence embedded in the signed payload.
    pub fn signed_sequence(&self) -> Option<u64> {
        let blob = self.sign()?;
        let payload_hex = blob.get(..blob.len().checked_sub(SIGNATURE_HEX_LEN)?)?;
        let payload: Value = serde_json::from_slice(&hex::decode(payload_hex).ok()?).ok()?;
        payload.get("sequence")?.as_u64()
    }
}

/// A running mock node and the requests it has served.
pub struct MockNode {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

impl MockNode {
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<MockRequest> {
        self.requests().into_iter().filter(|r| r.is_submission()).collect()
    }

    pub fn sequence_lookups(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path.starts_with("/exchange/sequence/"))
            .count()
    }

    /// Client configuration pointing at this node over plain HTTP.
    pub fn config(&self) -> ExchangeConfig {
        ExchangeConfig::new(vec!["127.0.0.1".to_string()], self.addr.port(), false)
    }
}

/// Start a programmable mock exchange node on an ephemeral port.
///
/// `f` maps each request to an HTTP status and a body.
pub async fn start_mock_node<F, Fut>(f: F) -> MockNode
where
    F: Fn(MockRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        seen.lock().unwrap().push(request.clone());

                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
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

    MockNode { addr, requests }
}

async fn read_request(socket: &mut TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();
    Some(MockRequest { method, path, body })
}

pub fn sequence_reply(sequence: u64) -> String {
    serde_json::json!({"code": "0", "data": {"sequence": sequence}}).to_string()
}

pub fn success_reply(hash: &str) -> String {
    serde_json::json!({"code": "0", "data": {"hash": hash}}).to_string()
}

pub fn ledger_failure_reply(result: &str, msg: &str) -> String {
    serde_json::json!({"code": "100", "msg": msg, "data": {"result": result}}).to_string()
}

pub fn query_failure_reply(code: &str, msg: &str) -> String {
    serde_json::json!({"code": code, "msg": msg}).to_string()
}
