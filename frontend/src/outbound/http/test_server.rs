//! One-shot HTTP responder for adapter tests.
//!
//! Each canned response is served on its own connection, in order, and the
//! raw requests are handed back for assertions.

use std::time::Duration;

use reqwest::Url;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::ApiClient;

pub(crate) struct Canned {
    pub status: u16,
    pub body: &'static str,
}

impl Canned {
    pub fn json(status: u16, body: &'static str) -> Self {
        Self { status, body }
    }
}

#[derive(Debug)]
pub(crate) struct Recorded {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|position| position + 4)
}

pub(crate) async fn serve(responses: Vec<Canned>) -> (ApiClient, JoinHandle<Vec<Recorded>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let address = listener.local_addr().expect("listener address");
    let handle = tokio::spawn(async move {
        let mut recorded = Vec::with_capacity(responses.len());
        for canned in responses {
            let (mut socket, _) = listener.accept().await.expect("accept connection");
            let mut buffer = Vec::new();
            let mut chunk = [0_u8; 2048];
            let header_end = loop {
                let read = socket.read(&mut chunk).await.expect("read request");
                assert!(read > 0, "client closed before sending headers");
                buffer.extend_from_slice(&chunk[..read]);
                if let Some(end) = find_header_end(&buffer) {
                    break end;
                }
            };
            let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
            let mut lines = head.lines();
            let request_line = lines.next().unwrap_or_default().to_owned();
            let headers: Vec<(String, String)> = lines
                .filter_map(|line| line.split_once(':'))
                .map(|(name, value)| (name.trim().to_owned(), value.trim().to_owned()))
                .collect();
            let content_length = headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.parse::<usize>().ok())
                .unwrap_or(0);
            while buffer.len() < header_end + content_length {
                let read = socket.read(&mut chunk).await.expect("read request body");
                assert!(read > 0, "client closed before sending body");
                buffer.extend_from_slice(&chunk[..read]);
            }
            let body = String::from_utf8_lossy(&buffer[header_end..header_end + content_length])
                .into_owned();

            let mut parts = request_line.split_whitespace();
            recorded.push(Recorded {
                method: parts.next().unwrap_or_default().to_owned(),
                target: parts.next().unwrap_or_default().to_owned(),
                headers,
                body,
            });

            let response = format!(
                concat!(
                    "HTTP/1.1 {} Canned\r\n",
                    "content-type: application/json\r\n",
                    "content-length: {}\r\n",
                    "connection: close\r\n\r\n{}",
                ),
                canned.status,
                canned.body.len(),
                canned.body
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            socket.shutdown().await.expect("close connection");
        }
        recorded
    });

    let base_url = Url::parse(&format!("http://{address}")).expect("loopback url");
    let client = ApiClient::new(base_url, Duration::from_secs(5)).expect("client builds");
    (client, handle)
}
