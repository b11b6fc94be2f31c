//! End-to-end tests for the executor and dispatcher against local
//! listeners.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use httpcheck_core::{CheckDefinition, CheckResult, CheckSet, Dispatcher, Executor, Sink};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a canned HTTP response for every connection; returns the
/// host:port the server listens on.
async fn spawn_server(
    status_line: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { break };
            tokio::spawn(async move {
                // The whole request head fits in one read for these tests.
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("127.0.0.1:{}", addr.port())
}

/// A host:port nothing listens on.
async fn refused_domain() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("127.0.0.1:{}", addr.port())
}

#[derive(Default)]
struct RecordingSink {
    results: Mutex<Vec<CheckResult>>,
}

impl RecordingSink {
    fn results(&self) -> Vec<CheckResult> {
        self.results.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Sink for RecordingSink {
    async fn submit(&self, result: &CheckResult) -> anyhow::Result<()> {
        self.results.lock().unwrap().push(result.clone());
        Ok(())
    }
}

struct FailingSink {
    attempts: AtomicUsize,
}

#[async_trait::async_trait]
impl Sink for FailingSink {
    async fn submit(&self, _result: &CheckResult) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("sink unavailable")
    }
}

#[tokio::test]
async fn executor_validates_a_matching_body() {
    let domain = spawn_server("200 OK", "text/plain", "OK").await;
    let definition = CheckDefinition {
        domains: vec![domain.clone()],
        response: "OK".to_string(),
        ..Default::default()
    };

    let executor = Executor::new().unwrap();
    let results = executor.execute("web", &definition, "http", &domain).await;

    assert_eq!(results.len(), 1);
    assert!(!results[0].is_error);
    assert_eq!(results[0].key, format!("web:http://{domain}"));
    assert_eq!(results[0].message, "All OK");
}

#[tokio::test]
async fn executor_reports_status_mismatch() {
    let domain = spawn_server("404 Not Found", "text/plain", "missing").await;
    let definition = CheckDefinition {
        domains: vec![domain.clone()],
        status: 200,
        ..Default::default()
    };

    let executor = Executor::new().unwrap();
    let results = executor.execute("web", &definition, "http", &domain).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].is_error);
    assert!(results[0].message.contains("200"));
    assert!(results[0].message.contains("404"));
}

#[tokio::test]
async fn executor_reports_transport_failures() {
    let domain = refused_domain().await;
    let definition = CheckDefinition {
        domains: vec![domain.clone()],
        status: 200,
        ..Default::default()
    };

    let executor = Executor::new().unwrap();
    let results = executor.execute("web", &definition, "http", &domain).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].is_error);
}

#[tokio::test]
async fn executor_iterates_every_domain() {
    let first = spawn_server("200 OK", "text/plain", "OK").await;
    let second = spawn_server("200 OK", "text/plain", "OK").await;
    let definition = CheckDefinition {
        domains: vec![first.clone(), second.clone()],
        response: "OK".to_string(),
        ..Default::default()
    };

    let executor = Arc::new(Executor::new().unwrap());
    let sink = Arc::new(RecordingSink::default());
    let dispatcher = Dispatcher::new(executor, sink.clone());

    let mut checks = CheckSet::new();
    checks.insert("web".to_string(), definition);
    dispatcher.run(&checks, None).await;

    let results = sink.results();
    assert_eq!(results.len(), 2);
    let keys: Vec<_> = results.iter().map(|r| r.key.clone()).collect();
    assert!(keys.contains(&format!("web:http://{first}")));
    assert!(keys.contains(&format!("web:http://{second}")));
}

#[tokio::test]
async fn dispatcher_completes_every_check_despite_failures() {
    let good = spawn_server("200 OK", "text/plain", "OK").await;
    let bad = refused_domain().await;

    let mut checks = CheckSet::new();
    checks.insert(
        "good".to_string(),
        CheckDefinition {
            domains: vec![good.clone()],
            response: "OK".to_string(),
            ..Default::default()
        },
    );
    checks.insert(
        "bad".to_string(),
        CheckDefinition { domains: vec![bad.clone()], status: 200, ..Default::default() },
    );

    let sink = Arc::new(RecordingSink::default());
    let dispatcher = Dispatcher::new(Arc::new(Executor::new().unwrap()), sink.clone());
    dispatcher.run(&checks, None).await;

    let results = sink.results();
    assert_eq!(results.len(), 2);

    // The recording sink preserves every field exactly.
    let success = results.iter().find(|r| !r.is_error).unwrap();
    assert_eq!(success.ip, "");
    assert_eq!(success.key, format!("good:http://{good}"));
    assert_eq!(success.message, "All OK");

    let failure = results.iter().find(|r| r.is_error).unwrap();
    assert_eq!(failure.key, format!("bad:http://{bad}"));
}

#[tokio::test]
async fn dispatcher_applies_the_global_ip_override() {
    let domain = spawn_server("200 OK", "text/plain", "OK").await;
    let mut checks = CheckSet::new();
    checks.insert(
        "web".to_string(),
        CheckDefinition {
            ip: "10.0.0.1".to_string(),
            domains: vec![domain],
            response: "OK".to_string(),
            ..Default::default()
        },
    );

    let sink = Arc::new(RecordingSink::default());
    let dispatcher = Dispatcher::new(Arc::new(Executor::new().unwrap()), sink.clone());
    dispatcher.run(&checks, Some("192.0.2.9")).await;

    let results = sink.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ip, "192.0.2.9");
}

#[tokio::test]
async fn dispatcher_survives_sink_failures() {
    let domain = spawn_server("200 OK", "text/plain", "OK").await;
    let mut checks = CheckSet::new();
    checks.insert(
        "web".to_string(),
        CheckDefinition {
            domains: vec![domain],
            response: "OK".to_string(),
            ..Default::default()
        },
    );

    let sink = Arc::new(FailingSink { attempts: AtomicUsize::new(0) });
    let dispatcher = Dispatcher::new(Arc::new(Executor::new().unwrap()), sink.clone());

    // Must return normally even though every submission fails.
    dispatcher.run(&checks, None).await;
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrency_limit_still_runs_every_check() {
    let domain = spawn_server("200 OK", "text/plain", "OK").await;
    let mut checks = CheckSet::new();
    for name in ["a", "b", "c"] {
        checks.insert(
            name.to_string(),
            CheckDefinition {
                domains: vec![domain.clone()],
                response: "OK".to_string(),
                ..Default::default()
            },
        );
    }

    let sink = Arc::new(RecordingSink::default());
    let dispatcher = Dispatcher::new(Arc::new(Executor::new().unwrap()), sink.clone())
        .with_concurrency_limit(1);
    dispatcher.run(&checks, None).await;

    assert_eq!(sink.results().len(), 3);
}
