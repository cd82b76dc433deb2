//! The outcome of one executed job.

use std::fmt;

use crate::client::ResponseHead;
use crate::job::Job;

/// Snapshot of a completed request: the job as it was sent and the full
/// response it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub job: Job,
    pub body: Vec<u8>,
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub response: ResponseHead,
    pub proxy: Option<String>,
    pub content_type: Option<String>,
}

impl Exchange {
    /// First value of the response header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        crate::executor::is_good_status(self.status_code)
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status: {}, job: {}", self.status_code, self.job)
    }
}
