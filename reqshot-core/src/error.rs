//! Error types returned by the executor and its collaborators.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::exchange::Exchange;

/// Boxed cause carried by transport errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The job could not be turned into a request.
#[derive(Error, Debug)]
pub enum RequestConstructionError {
    #[error("invalid HTTP method {method:?}: {source}")]
    InvalidMethod {
        method: String,
        #[source]
        source: http::method::InvalidMethod,
    },

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid header name {name:?}: {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: http::header::InvalidHeaderName,
    },

    #[error("invalid value for header {name:?}: {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: http::header::InvalidHeaderValue,
    },
}

/// No response was obtained from the transport.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    #[error("transport rejected the request: {0}")]
    InvalidRequest(#[source] BoxError),

    #[error("{0}")]
    Other(#[source] BoxError),
}

/// Everything that can go wrong while executing a job.
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("couldn't create request: {0}")]
    RequestConstruction(#[from] RequestConstructionError),

    #[error(
        "couldn't make request for req {job} and timeout: {timeout:?}, time spent: {elapsed:?}: {source}"
    )]
    Transport {
        job: String,
        timeout: Duration,
        elapsed: Duration,
        #[source]
        source: TransportError,
    },

    #[error("couldn't read response body (status {status}): {source}")]
    BodyRead {
        status: u16,
        #[source]
        source: io::Error,
    },

    /// A response arrived but its status is outside `200..=399`.
    ///
    /// The complete exchange is kept so callers can still inspect headers and
    /// the body of the failed response.
    #[error("not good status code {status} requesting {job}, body excerpt: {excerpt}")]
    BadStatus {
        status: u16,
        job: String,
        excerpt: String,
        exchange: Box<Exchange>,
    },
}

impl ExecuteError {
    /// The exchange captured alongside the error, present only for bad statuses.
    pub fn exchange(&self) -> Option<&Exchange> {
        match self {
            ExecuteError::BadStatus { exchange, .. } => Some(exchange),
            _ => None,
        }
    }

    pub fn into_exchange(self) -> Option<Exchange> {
        match self {
            ExecuteError::BadStatus { exchange, .. } => Some(*exchange),
            _ => None,
        }
    }

    /// Status code of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ExecuteError::BodyRead { status, .. } | ExecuteError::BadStatus { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
