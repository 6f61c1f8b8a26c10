//! Integration tests for the pretty logger
//!
//! These tests verify:
//! - Level filtering for both outputs
//! - Attribute ordering, groups and context extraction
//! - Per-call routing to text and JSON
//! - JSON delivery to a local HTTP endpoint, bounded by the timeout
//! - Source locations of the logging call
//! - Thread safety of derived loggers

use rust_pretty_logger::prelude::*;
use rust_pretty_logger::{info, DispatchOutcome, JsonDispatcher};
use serde_json::{json, Value};
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";

// ============================================================================
// Local HTTP endpoint
// ============================================================================

struct CapturedRequest {
    head: String,
    body: String,
}

impl CapturedRequest {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

struct CaptureServer {
    url: String,
    requests: crossbeam_channel::Receiver<CapturedRequest>,
}

impl CaptureServer {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
        let addr = listener.local_addr().expect("listener address");
        let (tx, rx) = crossbeam_channel::unbounded();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let tx = tx.clone();
                thread::spawn(move || {
                    if let Some(request) = read_request(stream) {
                        let _ = tx.send(request);
                    }
                });
            }
        });

        Self {
            url: format!("http://{}/logs", addr),
            requests: rx,
        }
    }

    fn next(&self) -> CapturedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("expected a POST")
    }

    fn assert_silent(&self) {
        assert!(
            self.requests
                .recv_timeout(Duration::from_millis(200))
                .is_err(),
            "expected no POST"
        );
    }
}

fn read_request(mut stream: TcpStream) -> Option<CapturedRequest> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut head = String::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            return None;
        }
        if line == "\r\n" {
            break;
        }
        head.push_str(&line);
    }

    let lower = head.to_ascii_lowercase();
    let content_length = lower
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok());

    let mut body = Vec::new();
    if let Some(len) = content_length {
        body.resize(len, 0);
        reader.read_exact(&mut body).ok()?;
    } else if lower.contains("transfer-encoding: chunked") {
        loop {
            let mut size_line = String::new();
            reader.read_line(&mut size_line).ok()?;
            let size = usize::from_str_radix(size_line.trim().split(';').next()?, 16).ok()?;
            let mut chunk = vec![0; size + 2];
            reader.read_exact(&mut chunk).ok()?;
            if size == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..size]);
        }
    }

    stream.write_all(OK_RESPONSE).ok()?;

    Some(CapturedRequest {
        head,
        body: String::from_utf8(body).ok()?,
    })
}

fn logger_to(buffer: &SharedBuffer, server: &CaptureServer) -> Logger {
    Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .json_url(server.url.clone())
        .json_timeout(Duration::from_secs(5))
        .build()
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_disabled_level_reaches_neither_output() {
    let server = CaptureServer::start();
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .json_url(server.url.clone())
        .min_level(LogLevel::Warn)
        .build();

    logger.info("quiet", &attrs!["k" => "v"]);
    logger.debug_json("quieter", &[]);

    assert!(buffer.is_empty());
    server.assert_silent();
    assert_eq!(logger.metrics().filtered(), 2);
    assert_eq!(logger.metrics().json_attempts(), 0);
}

// ============================================================================
// Text output
// ============================================================================

#[test]
fn test_block_layout_without_source() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .add_source(false)
        .build();

    logger.warn(
        "disk almost full",
        &attrs!["mount" => "/var", "free_mb" => 12],
    );

    let output = buffer.contents();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "===============WARN================");
    assert_eq!(lines[1], " disk almost full");
    assert!(!lines[2].contains('@'));
    assert_eq!(lines[3], "\t- mount : /var");
    assert_eq!(lines[4], "\t- free_mb : 12");
    assert_eq!(lines[5], "====================================");
}

#[test]
fn test_colorized_banner() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder().writer(buffer.clone()).build();

    logger.info("tinted", &[]);
    logger.error("alarming", &[]);

    let output = buffer.contents();
    let info_banner = "\x1b[34m===============INFO================\x1b[0m";
    let error_banner = "\x1b[31m===============ERROR================\x1b[0m";
    assert!(output.contains(info_banner));
    assert!(output.contains(error_banner));
}

#[test]
fn test_message_cannot_inject_lines() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .build();

    logger.info("line one\n===============ERROR================", &[]);

    let output = buffer.contents();
    assert_eq!(output.lines().count(), 4);
    assert!(output.contains(" line one\\n===============ERROR"));
}

#[test]
fn test_attribute_order_and_group() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .build()
        .with([("A", "bound")])
        .with_group("G")
        .with_context_keys(["u"]);
    let ctx = LogContext::new().with_value("u", "ctx");

    logger.info_ctx(&ctx, "ordered", &attrs!["B" => "call"]);

    let output = buffer.contents();
    let lines: Vec<&str> = output.lines().filter(|l| l.starts_with("\t- ")).collect();
    assert_eq!(
        lines,
        vec!["\t- G.A : bound", "\t- G.B : call", "\t- G.u : ctx"]
    );
}

#[test]
fn test_missing_context_key_is_skipped() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .build()
        .with_context_keys(["request_id", "user"]);
    let ctx = LogContext::new().with_plain_value("user", 7);

    logger.info_ctx(&ctx, "partial", &[]);

    let output = buffer.contents();
    assert!(output.contains("\t- user : 7\n"));
    assert!(!output.contains("request_id"));
}

#[test]
fn test_derivation_does_not_touch_parent() {
    let buffer = SharedBuffer::new();
    let base = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .build();
    let _child = base.with([("x", 1)]).with_group("G");

    base.info("from parent", &attrs!["y" => 2]);

    let output = buffer.contents();
    assert!(output.contains("\t- y : 2\n"));
    assert!(!output.contains("x : 1"));
    assert!(!output.contains("G."));
}

#[test]
fn test_siblings_do_not_share_attributes() {
    let buffer = SharedBuffer::new();
    let base = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .build();
    let first = base.with([("x", "1")]);
    let second = base.with([("y", "2")]);

    first.info("from first", &[]);
    let output = buffer.contents();
    assert!(output.contains("\t- x : 1\n"));
    assert!(!output.contains("\t- y : 2\n"));

    buffer.clear();
    second.info("from second", &[]);
    let output = buffer.contents();
    assert!(output.contains("\t- y : 2\n"));
    assert!(!output.contains("\t- x : 1\n"));
}

#[test]
fn test_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("pretty.log");

    let sink = TextSink::file(&log_file).expect("Failed to open log file");
    let logger = Logger::builder().sink(sink).colorize(false).build();

    logger.info("first", &[]);
    logger.error("second", &attrs!["code" => 500]);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(
        content.matches("====================================\n").count(),
        2
    );
    assert!(content.contains(" first\n"));
    assert!(content.contains("\t- code : 500\n"));
}

// ============================================================================
// JSON output
// ============================================================================

#[test]
fn test_json_payload_and_content_type() {
    let server = CaptureServer::start();
    let buffer = SharedBuffer::new();
    let logger = logger_to(&buffer, &server);

    logger.info("foo", &attrs!["url" => "/api", "attempt" => 3]);

    let request = server.next();
    assert!(request.head.starts_with("POST /logs "));
    assert!(request
        .head
        .to_ascii_lowercase()
        .contains("content-type: application/json"));

    let payload = request.json();
    assert_eq!(payload["level"], "INFO");
    assert_eq!(payload["msg"], "foo");
    assert_eq!(payload["url"], "/api");
    assert_eq!(payload["attempt"], "3");
    assert!(payload["time"].is_string());

    assert!(buffer.contents().contains(" foo\n"));
    assert_eq!(logger.metrics().json_delivered(), 1);
}

#[test]
fn test_group_nests_in_json_but_prefixes_in_text() {
    let server = CaptureServer::start();
    let buffer = SharedBuffer::new();
    let logger = logger_to(&buffer, &server).with_group("vals");

    logger.info("grouped", &attrs!["a" => 1, "b" => 2]);

    let payload = server.next().json();
    assert_eq!(payload["vals"], json!({"a": "1", "b": "2"}));
    assert!(payload.get("a").is_none());

    let output = buffer.contents();
    assert!(output.contains("\t- vals.a : 1\n"));
    assert!(output.contains("\t- vals.b : 2\n"));
}

#[test]
fn test_json_carries_context_values() {
    let server = CaptureServer::start();
    let buffer = SharedBuffer::new();
    let logger = logger_to(&buffer, &server).with_context_keys(["id"]);
    let ctx = LogContext::new().with_value("id", "my id");

    logger.warn_ctx_json(&ctx, "json with ctx", &[]);

    let payload = server.next().json();
    assert_eq!(payload["id"], "my id");
    assert_eq!(payload["level"], "WARN");
    assert!(buffer.is_empty());
}

#[test]
fn test_json_only_sends_exactly_once() {
    let server = CaptureServer::start();
    let buffer = SharedBuffer::new();
    let logger = logger_to(&buffer, &server);

    logger.error_json("remote only", &[]);

    assert_eq!(server.next().json()["msg"], "remote only");
    server.assert_silent();
    assert!(buffer.is_empty());
}

#[test]
fn test_text_only_sends_nothing() {
    let server = CaptureServer::start();
    let buffer = SharedBuffer::new();
    let logger = logger_to(&buffer, &server);

    logger.info_text("local only", &[]);

    server.assert_silent();
    assert!(buffer.contents().contains(" local only\n"));
    assert_eq!(logger.metrics().json_attempts(), 0);
}

#[test]
fn test_routing_is_per_call() {
    let server = CaptureServer::start();
    let buffer = SharedBuffer::new();
    let logger = logger_to(&buffer, &server);
    let sibling = logger.with_group("other");

    logger.info_json("json", &[]);
    sibling.info("both", &[]);

    assert_eq!(server.next().json()["msg"], "json");
    assert_eq!(server.next().json()["msg"], "both");
    let output = buffer.contents();
    assert!(output.contains(" both\n"));
    assert!(!output.contains(" json\n"));
}

#[test]
fn test_unresponsive_endpoint_is_bounded_by_timeout() {
    // Accepts connections but never answers
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let url = format!("http://{}/logs", listener.local_addr().expect("address"));

    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .json_url(url)
        .json_timeout(Duration::from_millis(100))
        .build();

    let start = Instant::now();
    logger.info("slow endpoint", &[]);
    let elapsed = start.elapsed();

    assert!(elapsed < Duration::from_secs(1), "took {:?}", elapsed);
    assert!(buffer.contents().contains(" slow endpoint\n"));
    assert_eq!(logger.metrics().json_timed_out(), 1);
    drop(listener);
}

#[test]
fn test_unreachable_endpoint_still_writes_text() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let url = format!("http://{}/logs", listener.local_addr().expect("address"));
    drop(listener);

    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .json_url(url)
        .build();

    logger.error("endpoint down", &[]);

    assert!(buffer.contents().contains(" endpoint down\n"));
    assert_eq!(logger.metrics().text_written(), 1);
    assert_eq!(logger.metrics().json_delivered(), 0);
}

#[test]
fn test_dispatcher_reports_delivery() {
    let server = CaptureServer::start();
    let options = HandlerOptions::new().with_json_url(server.url.clone());
    let dispatcher = JsonDispatcher::new(&options);

    let outcome = dispatcher
        .dispatch(&LogEntry::new(LogLevel::Debug, "direct"), Some("grp"))
        .expect("dispatch succeeds");

    assert_eq!(outcome, DispatchOutcome::Delivered(200));
    let payload = server.next().json();
    assert_eq!(payload["msg"], "direct");
    assert!(payload.get("grp").is_none());
}

// ============================================================================
// Source locations
// ============================================================================

#[test]
fn test_source_points_at_call_site() {
    let server = CaptureServer::start();
    let buffer = SharedBuffer::new();
    let logger = logger_to(&buffer, &server);

    let line = line!() + 1;
    logger.info("where am i", &[]);

    let expected = format!("integration_tests.rs:{}", line);
    assert!(buffer.contents().contains(&format!("@{}", expected)));
    assert_eq!(server.next().json()["source"], expected.as_str());
}

#[test]
fn test_source_through_generic_and_macro_calls() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .build();

    let first = line!() + 1;
    logger.log_ctx_text(&LogContext::new(), LogLevel::Warn, "generic", &[]);
    let second = line!() + 1;
    info!(logger, "macro {}", 1);

    let output = buffer.contents();
    let first = format!("@integration_tests.rs:{}\n", first);
    let second = format!("@integration_tests.rs:{}\n", second);
    assert!(output.contains(&first));
    assert!(output.contains(&second));
}

#[test]
fn test_no_source_when_disabled() {
    let server = CaptureServer::start();
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colorize(false)
        .add_source(false)
        .json_url(server.url.clone())
        .json_timeout(Duration::from_secs(5))
        .build();

    logger.info("anonymous", &[]);

    assert!(!buffer.contents().contains('@'));
    assert!(server.next().json().get("source").is_none());
}

// ============================================================================
// Thread safety
// ============================================================================

#[test]
fn test_concurrent_derived_loggers() {
    let buffer = SharedBuffer::new();
    let logger = Arc::new(
        Logger::builder()
            .writer(buffer.clone())
            .colorize(false)
            .build(),
    );

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = logger.with_group(format!("worker{}", t));
            thread::spawn(move || {
                for i in 0..25 {
                    logger.info(format!("message {}", i), &attrs!["i" => i]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let output = buffer.contents();
    assert_eq!(
        output.matches("===============INFO================\n").count(),
        100
    );
    for t in 0..4 {
        assert_eq!(output.matches(&format!("\t- worker{}.i : ", t)).count(), 25);
    }
    assert_eq!(logger.metrics().text_written(), 100);
}
