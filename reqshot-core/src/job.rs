//! Job types: the description of one HTTP request.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::RequestConstructionError;

/// HTTP request methods.
///
/// The standard methods have their own variants; any other valid method token
/// (`PURGE`, `PROPFIND`, ...) is kept verbatim in [`HttpMethod::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
    Custom(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Custom(m) => m,
        }
    }

    /// Checks that the method is a valid HTTP token.
    pub fn validate(&self) -> Result<(), RequestConstructionError> {
        if let HttpMethod::Custom(m) = self {
            http::Method::from_bytes(m.as_bytes()).map_err(|source| {
                RequestConstructionError::InvalidMethod {
                    method: m.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = RequestConstructionError;

    /// Standard methods match case-insensitively; extension methods are
    /// case-sensitive and kept as written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s.to_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            "TRACE" => HttpMethod::Trace,
            "CONNECT" => HttpMethod::Connect,
            _ => HttpMethod::Custom(s.to_string()),
        };
        method.validate()?;
        Ok(method)
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = RequestConstructionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One HTTP request to perform.
///
/// The executor writes the rendered cURL equivalent back into [`Job::curl`]
/// once the request has been constructed, so a job used for diagnostics after
/// execution reads like a shell command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Job {
    pub method: HttpMethod,
    pub url: String,
    /// Request body. `None` and an empty vector both mean "no body".
    /// In JSON the payload is a string.
    #[serde(deserialize_with = "payload_from_text")]
    pub payload: Option<Vec<u8>>,
    pub headers: BTreeMap<String, String>,
    /// Free-text tag attached to every diagnostic about this job.
    pub info: String,
    #[serde(skip_deserializing)]
    pub curl: String,
}

impl Job {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// The payload, if it has any bytes.
    pub fn body(&self) -> Option<&[u8]> {
        self.payload.as_deref().filter(|p| !p.is_empty())
    }

    /// Parses a job from its JSON representation.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl std::fmt::Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.curl.is_empty() {
            return f.write_str(&self.curl);
        }
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Pacing hints for an orchestrator that runs jobs repeatedly.
///
/// The executor never reads these; they travel next to a [`Job`] so that the
/// caller deciding about retries and pacing has them in one place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    pub retry_if_error: Duration,
    pub sleep_in_case_of_error: Duration,
    pub delay: Duration,
    pub lock_between_requests: Duration,
}

fn payload_from_text<'de, D>(d: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.map(String::into_bytes))
}
