//! Handler type and the process-wide default handler.

use std::{
    error::Error as StdError,
    fmt::Write as _,
    io::{Result as IoResult, Write, stderr},
    sync::Arc,
};

use tracing::{debug, error, info, trace, warn};

use crate::{
    config::{ReportLevel, ReportSink, ReporterSettings, current_settings},
    context::Context,
};

/// Callback receiving the first report of each error within a binding.
///
/// Arguments are the context passed to the capture call, the error, and the
/// report message.
pub type ErrorHandler = Arc<dyn Fn(&Context, &(dyn StdError + 'static), &str) + Send + Sync>;

/// Wraps a closure as an [`ErrorHandler`].
pub fn handler<F>(f: F) -> ErrorHandler
where
    F: Fn(&Context, &(dyn StdError + 'static), &str) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Formats a report line as `Error: <message>: <error text>`.
pub fn format_report(msg: &str, err: &(dyn StdError + 'static)) -> String {
    format!("Error: {msg}: {err}")
}

/// Default handler driven by explicit settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandler {
    settings: ReporterSettings,
}

impl DefaultHandler {
    /// Creates a default handler with the given settings.
    pub fn new(settings: ReporterSettings) -> Self {
        Self { settings }
    }

    /// Writes one report according to the settings.
    pub fn report(&self, _ctx: &Context, err: &(dyn StdError + 'static), msg: &str) {
        match self.settings.sink {
            ReportSink::Log => {
                let line = self.render(err, msg);
                match self.settings.level {
                    ReportLevel::Trace => trace!(target: "ctxerror", "{line}"),
                    ReportLevel::Debug => debug!(target: "ctxerror", "{line}"),
                    ReportLevel::Info => info!(target: "ctxerror", "{line}"),
                    ReportLevel::Warn => warn!(target: "ctxerror", "{line}"),
                    ReportLevel::Error => error!(target: "ctxerror", "{line}"),
                }
            }
            ReportSink::Stderr => {
                let _ = self.write_report(&mut stderr().lock(), err, msg);
            }
        }
    }

    /// Writes the report line to `writer`, ignoring the configured sink.
    ///
    /// # Errors
    ///
    /// Returns any error from `writer`.
    pub fn write_report<W: Write>(
        &self,
        writer: &mut W,
        err: &(dyn StdError + 'static),
        msg: &str,
    ) -> IoResult<()> {
        writeln!(writer, "{}", self.render(err, msg))
    }

    fn render(&self, err: &(dyn StdError + 'static), msg: &str) -> String {
        let mut line = format_report(msg, err);
        if self.settings.include_sources {
            let mut source = err.source();
            while let Some(cause) = source {
                let _ = write!(line, ": {cause}");
                source = cause.source();
            }
        }
        line
    }
}

/// Handler used when a binding was created without one.
///
/// Reads the installed [`ReporterSettings`] on every call.
pub fn default_handler(ctx: &Context, err: &(dyn StdError + 'static), msg: &str) {
    DefaultHandler::new(current_settings()).report(ctx, err, msg);
}
