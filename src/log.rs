//! Diagnostic severities and the pluggable log sink.

use std::fmt;

/// Diagnostic severity levels a parse can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        })
    }
}

/// A pluggable diagnostic callback installed on a [`crate::Parser`].
pub type LogSink = Box<dyn FnMut(Severity, &str)>;

/// Emits a diagnostic either through an installed [`LogSink`] or, absent
/// one, through the `log` crate's facade — giving embedders a working
/// default (wired up by whatever `log` backend they've installed, e.g.
/// `env_logger`) without requiring them to supply a callback up front.
pub(crate) fn emit(sink: &mut Option<LogSink>, severity: Severity, message: &str) {
    match sink {
        Some(callback) => callback(severity, message),
        None => match severity {
            Severity::Debug => log::debug!("{message}"),
            Severity::Info => log::info!("{message}"),
            Severity::Warn => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        },
    }
}
