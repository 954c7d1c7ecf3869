#![cfg(feature = "quote")]
//! Quote client against a local one-shot HTTP stub, plus an opt-in live API check.

use delve::config::QuoteConfig;
use delve::quote::{QuoteClient, QuoteError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve exactly one HTTP response; returns the URL to hit and a channel yielding the raw
/// request head the client sent.
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let Ok((mut sock, _)) = listener.accept().await else {
            return;
        };
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match sock.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }
        let _ = tx.send(String::from_utf8_lossy(&head).to_string());
        let resp = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let _ = sock.write_all(resp.as_bytes()).await;
        let _ = sock.shutdown().await;
    });
    (format!("http://{}/api/v1/quotes/random", addr), rx)
}

fn local_client(config: QuoteConfig) -> QuoteClient {
    // Bypass any proxy from the environment; the stub lives on loopback.
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("http client");
    QuoteClient::with_client(config, http)
}

fn client_for(url: String) -> QuoteClient {
    local_client(QuoteConfig {
        url,
        user_agent: "delve-test/1.0".to_string(),
        timeout_seconds: 5,
        ..QuoteConfig::default()
    })
}

#[tokio::test]
async fn fetches_and_trims_quote() {
    let (url, head) = serve_once("200 OK", r#"{"message":"  Sorry losers and haters.  "}"#).await;
    let quote = client_for(url).fetch().await.expect("quote");
    assert_eq!(quote, "Sorry losers and haters.");

    let head = head.await.expect("request head").to_lowercase();
    assert!(head.starts_with("get /api/v1/quotes/random"), "{}", head);
    assert!(head.contains("accept: application/json"), "{}", head);
    assert!(head.contains("user-agent: delve-test/1.0"), "{}", head);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (url, _head) = serve_once("503 Service Unavailable", "{}").await;
    let err = client_for(url).fetch().await.unwrap_err();
    assert!(matches!(err, QuoteError::Status(503)), "{:?}", err);
}

#[tokio::test]
async fn invalid_json_is_malformed() {
    let (url, _head) = serve_once("200 OK", "<html>maintenance</html>").await;
    let err = client_for(url).fetch().await.unwrap_err();
    assert!(matches!(err, QuoteError::Malformed(_)), "{:?}", err);
}

#[tokio::test]
async fn wrong_field_is_missing_field() {
    let (url, _head) = serve_once("200 OK", r#"{"quote":"elsewhere","message":null}"#).await;
    let err = client_for(url).fetch().await.unwrap_err();
    assert!(matches!(err, QuoteError::MissingField(_)), "{:?}", err);
}

#[tokio::test]
async fn refused_connection_is_transport() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let err = client_for(format!("http://{}/", addr)).fetch().await.unwrap_err();
    assert!(matches!(err, QuoteError::Transport(_)), "{:?}", err);
    assert!(err.to_string().starts_with("could not reach the quote API"));
}

#[tokio::test]
async fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        // Accept and hold the socket open without answering.
        if let Ok((sock, _)) = listener.accept().await {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            drop(sock);
        }
    });
    let client = local_client(QuoteConfig {
        url: format!("http://{}/", addr),
        timeout_seconds: 1,
        ..QuoteConfig::default()
    });
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, QuoteError::Transport(ref m) if m.contains("timed out")), "{:?}", err);
}

/// Live call to the real endpoint (requires network)
#[tokio::test]
#[ignore] // Ignore by default since it requires network
async fn test_quote_real_api() {
    let client = QuoteClient::new(QuoteConfig::default());
    match client.fetch().await {
        Ok(quote) => {
            println!("Quote: {}", quote);
            assert!(!quote.is_empty());
        }
        Err(e) => panic!("Quote API call failed: {:?}", e),
    }
}
