//! Configuration errors.
//!
//! The simulation itself is total; only setup can fail (bad frame rate,
//! bad settings file).

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// Frame limiter asked for a non-positive frame rate.
    InvalidFrameRate(i32),

    /// A settings value is outside its usable range.
    InvalidSetting {
        /// Field name (for logging).
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// Settings file could not be read.
    Io(std::io::Error),

    /// Settings file is not valid JSON for [`crate::Settings`].
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFrameRate(fps) => write!(f, "invalid frame rate: {}", fps),
            ConfigError::InvalidSetting {
                name,
                value,
                expected,
            } => write!(f, "setting '{}' = {} must be {}", name, value, expected),
            ConfigError::Io(e) => write!(f, "failed to read settings: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;
