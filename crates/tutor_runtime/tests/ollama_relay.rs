//! End-to-end relay over HTTP against a mock Ollama server.

use std::time::Duration;

use futures::StreamExt;
use mockito::Matcher;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tutor_core::{ConversationTurn, GenerationRequest, Transcript};
use tutor_runtime::relay::{RETRIES_EXHAUSTED_NOTICE, retry_notice};
use tutor_runtime::{RelayEngine, RuntimeConfig};

fn engine_for(server: &mockito::ServerGuard, max_retries: u32) -> RelayEngine {
    let config = RuntimeConfig::new()
        .with_base_url(server.url())
        .with_request_timeout(Duration::from_secs(5))
        .with_max_retries(max_retries)
        .with_retry_backoff(Duration::from_millis(10));
    RelayEngine::from_config(&config).unwrap()
}

fn request(message: &str) -> GenerationRequest {
    let transcript: Transcript = vec![ConversationTurn::user("Hi")].into_iter().collect();
    GenerationRequest::new(message, transcript, "gemma:2b")
}

#[tokio::test]
async fn test_relays_ndjson_as_cumulative_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "model": "gemma:2b",
                "stream": true,
                "options": { "temperature": 0.7, "num_predict": 1024 }
            })),
            Matcher::Regex(r"User: Hi\\nUser: How are you\?\\nAssistant:".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/x-ndjson")
        .with_body(concat!(
            "{\"response\":\"I'm \",\"done\":false}\n",
            "{\"response\":\"good, thanks!\",\"done\":false}\n",
            "{\"response\":\"\",\"done\":true}\n",
        ))
        .expect(1)
        .create_async()
        .await;

    let outputs: Vec<String> = engine_for(&server, 3)
        .generate(request("How are you?"))
        .collect()
        .await;

    mock.assert_async().await;
    assert_eq!(outputs, vec!["I'm ", "I'm good, thanks!", "I'm good, thanks!"]);
}

#[tokio::test]
async fn test_malformed_lines_do_not_interrupt_relay() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(concat!(
            "{\"response\":\"Good \"}\n",
            "not json at all\n",
            "{\"response\":\"morning\"}\n",
            "{\"resp\n",
            "{\"response\":\"!\",\"done\":true}",
        ))
        .create_async()
        .await;

    let outputs: Vec<String> = engine_for(&server, 3)
        .generate(request("Hello"))
        .collect()
        .await;

    assert_eq!(outputs, vec!["Good ", "Good morning", "Good morning!"]);
}

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(500)
        .with_body("internal error")
        .expect(2)
        .create_async()
        .await;

    let outputs: Vec<String> = engine_for(&server, 2)
        .generate(request("Hello"))
        .collect()
        .await;

    mock.assert_async().await;
    assert_eq!(outputs.len(), 2);
    assert_eq!(
        outputs[0],
        "⛔ Connection Error: backend returned status 500: internal error\nRetrying..."
    );
    assert_eq!(outputs[1], RETRIES_EXHAUSTED_NOTICE);
}

const STALLED_REPLY: &[u8] = b"HTTP/1.1 200 OK\r\n\
    Content-Type: application/x-ndjson\r\n\
    Transfer-Encoding: chunked\r\n\
    \r\n\
    13\r\n{\"response\":\"Hel\"}\n\r\n";

const FULL_REPLY: &[u8] = b"HTTP/1.1 200 OK\r\n\
    Content-Type: application/x-ndjson\r\n\
    Content-Length: 31\r\n\
    \r\n\
    {\"response\":\"Hi!\",\"done\":true}\n";

/// First connection goes silent after one frame; later ones answer fully.
async fn stalling_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut connection = 0;
        loop {
            let (mut socket, _) = listener.accept().await.unwrap();
            connection += 1;
            let reply = if connection == 1 { STALLED_REPLY } else { FULL_REPLY };

            tokio::spawn(async move {
                // The request fits in one read for these tests.
                let mut buf = vec![0u8; 64 * 1024];
                let _ = socket.read(&mut buf).await;
                socket.write_all(reply).await.unwrap();
                socket.flush().await.unwrap();
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_stalled_stream_is_retried() {
    let url = stalling_server().await;
    let config = RuntimeConfig::new()
        .with_base_url(url)
        .with_request_timeout(Duration::from_secs(5))
        .with_idle_timeout(Some(Duration::from_millis(200)))
        .with_max_retries(2)
        .with_retry_backoff(Duration::from_millis(10));
    let engine = RelayEngine::from_config(&config).unwrap();

    let outputs: Vec<String> = engine.generate(request("Hello")).collect().await;

    let stall = tutor_llms::Error::Timeout(Duration::from_millis(200));
    assert_eq!(
        outputs,
        vec!["Hel".to_string(), retry_notice(&stall), "Hi!".to_string()]
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = RuntimeConfig::new().with_base_url("  ");
    assert!(RelayEngine::from_config(&config).is_err());
}
