//! Where the executor sends its diagnostic messages.

use std::fmt;

use log::Level;

/// Receives the executor's diagnostics.
///
/// `info` is the tag of the job the message is about (possibly empty).
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, level: Level, info: &str, message: fmt::Arguments<'_>);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, level: Level, info: &str, message: fmt::Arguments<'_>) {
        (**self).emit(level, info, message)
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

pub const LOG_TARGET: &str = "reqshot::executor";

impl DiagnosticSink for LogSink {
    fn emit(&self, level: Level, info: &str, message: fmt::Arguments<'_>) {
        if info.is_empty() {
            log::log!(target: LOG_TARGET, level, "{}", message);
        } else {
            log::log!(target: LOG_TARGET, level, "[job-info={}] {}", info, message);
        }
    }
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _level: Level, _info: &str, _message: fmt::Arguments<'_>) {}
}
