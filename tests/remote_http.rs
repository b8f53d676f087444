//! Round-trips for the run client against canned HTTP replies served from
//! a local socket, plus a refused-connection case.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use jfpad::remote::{RemoteError, RunClient};
use jfpad::runner::{ExecutionClient, OutputSink, RunOutcome, SourceBuffer, UiState};

fn client_for(addr: SocketAddr) -> RunClient {
    RunClient::new(format!("http://{addr}/run"), Duration::from_secs(5)).unwrap()
}

/// Drain the request (headers plus content-length body) before answering,
/// so the client never sees a reset mid-write.
async fn read_request(socket: &mut TcpStream) {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..pos]).to_ascii_lowercase();
            let body_len = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= pos + 4 + body_len {
                break;
            }
        }
    }
}

async fn canned_server(status_line: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            read_request(&mut socket).await;
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    addr
}

#[tokio::test]
async fn clean_run_parses_into_success() {
    let addr = canned_server("HTTP/1.1 200 OK", r#"{"output":"3\n","error":""}"#).await;
    let reply = client_for(addr).execute("console.print(1+2).").await.unwrap();
    assert_eq!(
        RunOutcome::from_reply(reply),
        RunOutcome::Success { output: "3\n".to_string() }
    );
}

#[tokio::test]
async fn reported_program_error_is_a_normal_reply() {
    let addr = canned_server(
        "HTTP/1.1 200 OK",
        r#"{"output":"","error":"undefined name: x"}"#,
    )
    .await;
    let reply = client_for(addr).execute("console.print(x).").await.unwrap();
    assert_eq!(
        RunOutcome::from_reply(reply),
        RunOutcome::Failure {
            output: String::new(),
            error: "undefined name: x".to_string(),
        }
    );
}

#[tokio::test]
async fn unparseable_body_is_transport_tier() {
    let addr = canned_server("HTTP/1.1 200 OK", "this is not json").await;
    let err = client_for(addr).execute("x is 1.").await.unwrap_err();
    assert!(matches!(err, RemoteError::Malformed(_)));
}

#[tokio::test]
async fn non_success_status_is_transport_tier() {
    let addr = canned_server("HTTP/1.1 500 Internal Server Error", "{}").await;
    let err = client_for(addr).execute("x is 1.").await.unwrap_err();
    assert!(matches!(err, RemoteError::Status(s) if s.as_u16() == 500));
}

#[tokio::test]
async fn refused_connection_is_transport_tier() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).execute("x is 1.").await.unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}

struct Buf(String);

impl SourceBuffer for Buf {
    fn text(&self) -> String {
        self.0.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.0 = text.to_string();
    }
}

#[derive(Default)]
struct Sink {
    text: String,
    error: bool,
}

impl OutputSink for Sink {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_error_flag(&mut self, error: bool) {
        self.error = error;
    }
}

#[tokio::test]
async fn run_once_settles_against_a_live_reply() {
    let addr = canned_server(
        "HTTP/1.1 200 OK",
        r#"{"output":"Hello, World!\n","error":""}"#,
    )
    .await;

    let mut client = ExecutionClient::new(
        Buf("console.print(greeting).".to_string()),
        Sink::default(),
    );
    client.run_once(&client_for(addr)).await;

    assert_eq!(client.state(), UiState::Settled { ok: true });
    assert_eq!(client.sink().text, "Hello, World!\n");
    assert!(!client.sink().error);
}

#[tokio::test]
async fn run_once_against_a_dead_endpoint_settles_with_the_fixed_message() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut client = ExecutionClient::new(Buf("x is 1.".to_string()), Sink::default());
    client.run_once(&client_for(addr)).await;

    assert_eq!(client.state(), UiState::Settled { ok: false });
    assert_eq!(client.sink().text, jfpad::runner::UNREACHABLE_MESSAGE);
    assert!(client.sink().error);
}
