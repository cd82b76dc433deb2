use std::io::Cursor;
use std::process;
use std::time::Duration;

use reqshot_core::client::{HttpTransport, OutgoingRequest, ResponseHead, TransportResponse};
use reqshot_core::error::TransportError;
use reqshot_core::{Executor, HttpMethod, Job, SchedulingPolicy};

/// A simple canned transport for demonstration.
/// It doesn't actually make HTTP requests: `/missing` answers 404, everything
/// else answers 200 with a small JSON document.
pub struct ExampleMockTransport;

impl HttpTransport for ExampleMockTransport {
    fn send(
        &self,
        request: &OutgoingRequest,
        _timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        println!(
            ">>> [MOCK] Intercepted a {} request to '{}'",
            request.method, request.url
        );

        let (status, body) = if request.url.ends_with("/missing") {
            (404, "not found")
        } else {
            (200, r#"{"message": "Hello from ExampleMockTransport!"}"#)
        };

        Ok(TransportResponse {
            head: ResponseHead {
                status,
                url: request.url.clone(),
                version: "HTTP/1.1".to_string(),
            },
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Box::new(Cursor::new(body.as_bytes().to_vec())),
        })
    }
}

fn main() {
    let executor = Executor::new(ExampleMockTransport);
    let timeout = Duration::from_secs(10);

    // The orchestrator owns pacing; the executor never looks at it.
    let policy = SchedulingPolicy {
        delay: Duration::from_millis(250),
        ..Default::default()
    };

    let mut jobs = vec![
        Job::new(HttpMethod::Get, "https://api.example.com/v1/users")
            .with_header("Accept", "application/json")
            .with_info("list-users"),
        Job::new(HttpMethod::Post, "https://api.example.com/v1/data")
            .with_header("Content-Type", "application/json")
            .with_payload(r#"{"key": "value"}"#)
            .with_info("push-data"),
        Job::new(HttpMethod::Get, "https://api.example.com/missing").with_info("missing"),
    ];

    let mut failures = 0;
    for (i, job) in jobs.iter_mut().enumerate() {
        if i > 0 {
            std::thread::sleep(policy.delay);
        }

        match executor.execute(job, timeout) {
            Ok(exchange) => println!("{} -> {}", exchange, exchange.body_text()),
            Err(e) => {
                failures += 1;
                eprintln!("Execution error: {}", e);
                if let Some(exchange) = e.exchange() {
                    eprintln!("  (response still available: {} bytes)", exchange.body.len());
                }
            }
        }
    }

    if failures != 1 {
        eprintln!("Expected exactly one failing job, got {}", failures);
        process::exit(1);
    }
}
