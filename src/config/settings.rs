//! Settings for the default error handler.
//!
//! Settings are plain JSON. A process-wide copy is read by the default
//! handler each time it runs; bound handlers ignore it.

use std::{
    env::var_os,
    fs::read_to_string,
    io::{Error as StdError, ErrorKind},
    path::{Path, PathBuf},
};

use {
    parking_lot::RwLock,
    serde::Deserialize,
    serde_json::{Error as SerdeJsonError, from_str},
    thiserror::Error,
    tracing::debug,
};

/// Environment variable naming a settings file for [`ReporterSettings::from_env`].
pub const CONFIG_ENV_VAR: &str = "CTXERROR_CONFIG";

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Severity used when the default handler reports through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

/// Destination of default handler reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSink {
    /// Emit a `tracing` event with target `ctxerror`.
    #[default]
    Log,
    /// Write the report line to standard error.
    Stderr,
}

/// Default handler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReporterSettings {
    /// Level of the emitted event when `sink` is `log`.
    pub level: ReportLevel,
    /// Where reports go.
    pub sink: ReportSink,
    /// Whether to append each error in the `source()` chain to the report.
    pub include_sources: bool,
}

impl ReporterSettings {
    /// Settings used until others are installed.
    pub const DEFAULT: Self = Self {
        level: ReportLevel::Error,
        sink: ReportSink::Log,
        include_sources: false,
    };

    /// Loads settings from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Settings file location. A missing file yields the defaults.
    ///
    /// # Returns
    ///
    /// A `Result` containing the loaded `ReporterSettings`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match read_to_string(path) {
            Ok(contents) => {
                debug!("Loading reporter settings from file: {:?}", path);
                Ok(from_str(&contents)?)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No reporter settings at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads settings from the file named by `CTXERROR_CONFIG`.
    ///
    /// # Returns
    ///
    /// The loaded settings, or the defaults when the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` if the variable is set but empty,
    /// or any error from [`ReporterSettings::load`].
    pub fn from_env() -> Result<Self, SettingsError> {
        match var_os(CONFIG_ENV_VAR) {
            None => Ok(Self::default()),
            Some(path) if path.is_empty() => Err(SettingsError::InvalidValue {
                reason: format!("{CONFIG_ENV_VAR} is set but empty"),
            }),
            Some(path) => Self::load(&PathBuf::from(path)),
        }
    }
}

impl Default for ReporterSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static INSTALLED: RwLock<ReporterSettings> = RwLock::new(ReporterSettings::DEFAULT);

/// Replaces the process-wide settings read by the default handler.
pub fn install_settings(settings: ReporterSettings) {
    *INSTALLED.write() = settings;
}

/// Returns the process-wide settings read by the default handler.
pub fn current_settings() -> ReporterSettings {
    *INSTALLED.read()
}

/// Serializes tests that touch the process-wide settings.
#[cfg(test)]
pub(crate) static SETTINGS_TEST_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());
