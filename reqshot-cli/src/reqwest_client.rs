use std::time::Duration;

use reqshot_core::client::{HttpTransport, OutgoingRequest, ResponseHead, TransportResponse};
use reqshot_core::error::TransportError;
use reqshot_core::job::HttpMethod;
use reqwest::header::{CONNECTION, HeaderValue};
use reqwest::Method;

/// Settings for [`ReqwestTransport`].
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Route every request through this proxy URL.
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
}

/// The default transport, backed by the `reqwest` blocking client.
///
/// Idle connections are never kept, so every request opens a fresh one.
/// A zero timeout passed to [`HttpTransport::send`] means no time limit.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    proxy: Option<String>,
}

impl ReqwestTransport {
    pub fn new(options: TransportOptions) -> Result<Self, reqwest::Error> {
        // The blocking client otherwise applies its own 30s default.
        let mut builder = reqwest::blocking::Client::builder()
            .pool_max_idle_per_host(0)
            .timeout(None::<Duration>);
        if let Some(ref proxy) = options.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }
        if let Some(ref ua) = options.user_agent {
            builder = builder.user_agent(ua.as_str());
        }

        Ok(Self {
            client: builder.build()?,
            proxy: options.proxy,
        })
    }
}

fn to_reqwest_method(method: &HttpMethod) -> Result<Method, TransportError> {
    Ok(match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
        HttpMethod::Trace => Method::TRACE,
        HttpMethod::Connect => Method::CONNECT,
        HttpMethod::Custom(m) => Method::from_bytes(m.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(Box::new(e)))?,
    })
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(Box::new(e))
    } else if e.is_connect() {
        TransportError::Connect(Box::new(e))
    } else if e.is_builder() {
        TransportError::InvalidRequest(Box::new(e))
    } else {
        TransportError::Other(Box::new(e))
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: &OutgoingRequest,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(&request.method)?, request.url.as_str());
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }

        for (k, v) in &request.headers {
            builder = builder.header(k.as_str(), v.as_str());
        }
        if request.close_connection {
            builder = builder.header(CONNECTION, HeaderValue::from_static("close"));
        }

        if let Some(ref b) = request.body {
            builder = builder.body(b.clone());
        }

        let response = builder.send().map_err(classify)?;

        let head = ResponseHead {
            status: response.status().as_u16(),
            url: response.url().to_string(),
            version: format!("{:?}", response.version()),
        };

        let mut headers = Vec::new();
        for (k, v) in response.headers() {
            headers.push((
                k.as_str().to_string(),
                v.to_str().unwrap_or("(binary)").to_string(),
            ));
        }

        Ok(TransportResponse {
            head,
            headers,
            body: Box::new(response),
        })
    }

    fn proxy(&self) -> Option<String> {
        self.proxy.clone()
    }
}
