use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::Level;
use reqshot_core::{Executor, HttpMethod, Job, NullSink};
use tests::{CapturingSink, CapturingTransport};

#[test]
fn test_trace_sequence_for_success() {
    let transport = CapturingTransport::respond(200, "hi");
    let sink = CapturingSink::default();
    let mut job = Job::new(HttpMethod::Get, "http://x/ok").with_info("health-check");

    Executor::new(&transport)
        .with_sink(&sink)
        .execute(&mut job, Duration::from_secs(1))
        .unwrap();

    let records = sink.records();
    assert!(records.iter().all(|r| r.info == "health-check"));

    let traces = sink.messages_at(Level::Trace);
    assert_eq!(traces.len(), 3, "{:?}", traces);
    assert_eq!(traces[0], "requesting curl -X 'GET' 'http://x/ok'");
    assert_eq!(traces[1], "request is done: 200");
    assert!(traces[2].starts_with("request is finished for "));
    assert!(traces[2].ends_with(": curl -X 'GET' 'http://x/ok'"));
    assert!(sink.messages_at(Level::Error).is_empty());
}

#[test]
fn test_trace_sequence_for_transport_failure() {
    let transport = CapturingTransport::refusing();
    let sink = CapturingSink::default();
    let mut job = Job::new(HttpMethod::Get, "http://x/down");

    let _ = Executor::new(&transport)
        .with_sink(&sink)
        .execute(&mut job, Duration::from_secs(1));

    let traces = sink.messages_at(Level::Trace);
    assert_eq!(traces.len(), 3, "{:?}", traces);
    assert!(traces[1].starts_with("error: couldn't make request"));
    assert!(traces[2].starts_with("request is finished for "));
}

#[test]
fn test_bad_status_traces_body() {
    let transport = CapturingTransport::respond(502, "upstream gone");
    let sink = CapturingSink::default();
    let mut job = Job::new(HttpMethod::Get, "http://x/");

    let _ = Executor::new(&transport)
        .with_sink(&sink)
        .execute(&mut job, Duration::from_secs(1));

    assert!(sink
        .messages_at(Level::Trace)
        .contains(&"body text upstream gone".to_string()));
}

#[test]
fn test_construction_failure_emits_nothing() {
    let transport = CapturingTransport::respond(200, "");
    let sink = CapturingSink::default();
    let mut job = Job::new(HttpMethod::Get, "relative/path");

    let _ = Executor::new(&transport)
        .with_sink(&sink)
        .execute(&mut job, Duration::from_secs(1));

    assert!(sink.records().is_empty());
}

#[test]
fn test_shared_executor_across_threads() {
    let transport = CapturingTransport::with_responder(|req| {
        let status = if req.url.ends_with("/missing") { 404 } else { 200 };
        Ok(tests::response(req, status, std::io::Cursor::new(req.url.clone().into_bytes())))
    });
    let executor = Arc::new(Executor::new(transport).with_sink(NullSink));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let executor = Arc::clone(&executor);
            thread::spawn(move || {
                let url = if i % 2 == 0 {
                    format!("http://x/items/{}", i)
                } else {
                    "http://x/missing".to_string()
                };
                let mut job = Job::new(HttpMethod::Get, url.clone());
                (url, executor.execute(&mut job, Duration::from_secs(1)))
            })
        })
        .collect();

    for handle in handles {
        let (url, result) = handle.join().unwrap();
        match result {
            Ok(exchange) => assert_eq!(exchange.body, url.as_bytes()),
            Err(e) => {
                let exchange = e.exchange().unwrap();
                assert_eq!(exchange.status_code, 404);
                assert_eq!(exchange.body, url.as_bytes());
            }
        }
    }

    assert_eq!(executor.transport().calls(), 8);
}
