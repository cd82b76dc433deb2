//! Single-shot HTTP request executor.
//!
//! A [`Job`] describes one request. [`Executor::execute`] builds it, sends it
//! through an [`HttpTransport`] under a caller-supplied timeout, reads the whole
//! body and classifies the status code:
//!
//! - `200..=399`: `Ok(Exchange)`
//! - any other status: [`ExecuteError::BadStatus`], which still carries the
//!   populated [`Exchange`]
//! - no response at all: [`ExecuteError::Transport`]
//!
//! Nothing is retried. Pacing hints for callers that do retry live in
//! [`SchedulingPolicy`].

pub mod client;
pub mod curl;
pub mod diagnostics;
pub mod error;
pub mod exchange;
pub mod executor;
pub mod job;

pub use client::{HttpTransport, OutgoingRequest, ResponseHead, TransportResponse};
pub use diagnostics::{DiagnosticSink, LogSink, NullSink};
pub use error::{ExecuteError, RequestConstructionError, TransportError};
pub use exchange::Exchange;
pub use executor::{execute, Executor};
pub use job::{HttpMethod, Job, SchedulingPolicy};
