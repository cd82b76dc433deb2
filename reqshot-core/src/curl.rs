//! Renders an outgoing request as an equivalent `curl` invocation.
//!
//! Only used for diagnostics. The output is meant to be pasted into a POSIX
//! shell, so every argument is single-quoted.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::client::OutgoingRequest;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("payload of {0} bytes is not valid UTF-8 and cannot be passed with -d")]
    BinaryPayload(usize),
}

/// A rendered `curl` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlCommand(Vec<String>);

impl CurlCommand {
    pub fn args(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CurlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Builds `curl -X 'METHOD' [-d 'BODY'] [-H 'Name: value']... 'URL'`.
///
/// Headers are sorted by name; repeated names are merged into one `-H` with
/// their values separated by a space.
pub fn render(request: &OutgoingRequest) -> Result<CurlCommand, RenderError> {
    let mut parts = vec!["curl".to_string()];

    parts.push("-X".to_string());
    parts.push(shell_quote(request.method.as_str()));

    if let Some(body) = &request.body {
        let text =
            std::str::from_utf8(body).map_err(|_| RenderError::BinaryPayload(body.len()))?;
        parts.push("-d".to_string());
        parts.push(shell_quote(text));
    }

    let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (name, value) in &request.headers {
        grouped.entry(name.as_str()).or_default().push(value.as_str());
    }
    for (name, values) in grouped {
        parts.push("-H".to_string());
        parts.push(shell_quote(&format!("{}: {}", name, values.join(" "))));
    }

    parts.push(shell_quote(&request.url));

    Ok(CurlCommand(parts))
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
