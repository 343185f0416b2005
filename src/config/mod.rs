//! Configuration of the process-wide default error handler.
//!
//! Settings load from JSON and are installed once per process; the default
//! handler reads the installed copy on every report.

pub mod settings;

pub use settings::{
    CONFIG_ENV_VAR, ReportLevel, ReportSink, ReporterSettings, SettingsError, current_settings,
    install_settings,
};
