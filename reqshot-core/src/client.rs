use std::fmt;
use std::io::Read;
use std::time::Duration;

use crate::error::TransportError;
use crate::job::HttpMethod;

/// A fully validated request, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// `None` means the request is sent without a body.
    pub body: Option<Vec<u8>>,
    /// Ask the transport to close the connection after this exchange.
    pub close_connection: bool,
}

/// Status line level metadata of a received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    /// URL the response came from, after any redirects the transport followed.
    pub url: String,
    /// Protocol version, e.g. `HTTP/1.1`.
    pub version: String,
}

/// A response whose body has not been read yet.
pub struct TransportResponse {
    pub head: ResponseHead,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("head", &self.head)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// A generic interface to send one HTTP request.
/// Implement this trait and hand it to [`crate::executor::Executor`]
/// to decouple the executor from any specific HTTP library.
pub trait HttpTransport {
    /// Sends `request`, giving up once `timeout` has elapsed.
    /// A zero `timeout` means the caller imposes no limit.
    fn send(
        &self,
        request: &OutgoingRequest,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;

    /// Proxy the transport routes requests through, if any.
    fn proxy(&self) -> Option<String> {
        None
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn send(
        &self,
        request: &OutgoingRequest,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        (**self).send(request, timeout)
    }

    fn proxy(&self) -> Option<String> {
        (**self).proxy()
    }
}
