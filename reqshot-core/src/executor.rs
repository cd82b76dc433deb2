/// Executor: turns a job into one HTTP exchange and classifies the outcome.
use std::io::Read;
use std::time::{Duration, Instant};

use log::Level;

use crate::client::{HttpTransport, OutgoingRequest};
use crate::curl;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::{ExecuteError, RequestConstructionError};
use crate::exchange::Exchange;
use crate::job::Job;

/// Bad-status errors quote at most this many characters of the response body.
pub const MAX_EXCERPT_CHARS: usize = 2500;

/// Statuses in this range count as success; redirects the transport did not
/// follow are not failures.
pub fn is_good_status(status: u16) -> bool {
    (200..=399).contains(&status)
}

/// Runs jobs against one transport, reporting to one diagnostic sink.
///
/// Holds no per-call state, so a single executor can be shared between threads
/// when its transport and sink allow it.
#[derive(Debug, Clone)]
pub struct Executor<T, S = LogSink> {
    transport: T,
    sink: S,
}

impl<T: HttpTransport> Executor<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            sink: LogSink,
        }
    }
}

impl<T: HttpTransport, S: DiagnosticSink> Executor<T, S> {
    pub fn with_sink<S2: DiagnosticSink>(self, sink: S2) -> Executor<T, S2> {
        Executor {
            transport: self.transport,
            sink,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs `job` once.
    ///
    /// On return `job.curl` holds the rendered command (empty if rendering
    /// failed). A status outside `200..=399` is reported as
    /// [`ExecuteError::BadStatus`], which still owns the complete [`Exchange`].
    pub fn execute(&self, job: &mut Job, timeout: Duration) -> Result<Exchange, ExecuteError> {
        let started = Instant::now();

        let request = prepare(job)?;

        job.curl = match curl::render(&request) {
            Ok(cmd) => cmd.to_string(),
            Err(e) => {
                self.sink
                    .emit(Level::Error, &job.info, format_args!("err: {}", e));
                String::new()
            }
        };
        let job = &*job;

        self.sink
            .emit(Level::Trace, &job.info, format_args!("requesting {}", job));
        let _finished = FinishedGuard {
            sink: &self.sink,
            job,
            started,
        };

        let response = match self.transport.send(&request, timeout) {
            Ok(r) => r,
            Err(source) => {
                let err = ExecuteError::Transport {
                    job: job.to_string(),
                    timeout,
                    elapsed: started.elapsed(),
                    source,
                };
                self.sink
                    .emit(Level::Trace, &job.info, format_args!("error: {}", err));
                return Err(err);
            }
        };
        let status = response.head.status;
        self.sink.emit(
            Level::Trace,
            &job.info,
            format_args!("request is done: {}", status),
        );

        let mut body_stream = response.body;
        let mut body = Vec::new();
        body_stream
            .read_to_end(&mut body)
            .map_err(|source| ExecuteError::BodyRead { status, source })?;
        drop(body_stream);

        let mut exchange = Exchange {
            job: job.clone(),
            body,
            status_code: status,
            headers: response.headers,
            response: response.head,
            proxy: self.transport.proxy(),
            content_type: None,
        };
        exchange.content_type = exchange.header("content-type").map(str::to_string);

        if is_good_status(status) {
            return Ok(exchange);
        }

        let body_text = exchange.body_text();
        self.sink
            .emit(Level::Trace, &job.info, format_args!("body text {}", body_text));
        Err(ExecuteError::BadStatus {
            status,
            job: job.to_string(),
            excerpt: truncate_chars(&body_text, MAX_EXCERPT_CHARS).to_string(),
            exchange: Box::new(exchange),
        })
    }
}

/// Executes `job` through `transport`, logging via the `log` facade.
pub fn execute<T: HttpTransport>(
    transport: &T,
    job: &mut Job,
    timeout: Duration,
) -> Result<Exchange, ExecuteError> {
    Executor::new(transport).execute(job, timeout)
}

/// Validates `job` and builds the request the transport will send.
pub fn prepare(job: &Job) -> Result<OutgoingRequest, RequestConstructionError> {
    job.method.validate()?;
    url::Url::parse(&job.url).map_err(|source| RequestConstructionError::InvalidUrl {
        url: job.url.clone(),
        source,
    })?;

    let mut headers = Vec::with_capacity(job.headers.len());
    for (name, value) in &job.headers {
        http::HeaderName::from_bytes(name.as_bytes()).map_err(|source| {
            RequestConstructionError::InvalidHeaderName {
                name: name.clone(),
                source,
            }
        })?;
        http::HeaderValue::from_str(value).map_err(|source| {
            RequestConstructionError::InvalidHeaderValue {
                name: name.clone(),
                source,
            }
        })?;
        headers.push((name.clone(), value.clone()));
    }

    Ok(OutgoingRequest {
        method: job.method.clone(),
        url: job.url.clone(),
        headers,
        body: job.body().map(<[u8]>::to_vec),
        close_connection: true,
    })
}

/// Longest prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

struct FinishedGuard<'a, S: DiagnosticSink> {
    sink: &'a S,
    job: &'a Job,
    started: Instant,
}

impl<S: DiagnosticSink> Drop for FinishedGuard<'_, S> {
    fn drop(&mut self) {
        self.sink.emit(
            Level::Trace,
            &self.job.info,
            format_args!(
                "request is finished for {:?}: {}",
                self.started.elapsed(),
                self.job
            ),
        );
    }
}
