//! Scene construction and configuration errors.
//!
//! Stepping a scene never fails; everything that can go wrong happens while
//! turning a `SceneConfig` into a `Scene`.

use std::fmt;

/// A configuration value that cannot produce a valid scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A quantity that must be strictly positive was not
    NonPositive {
        /// Which field (for logging)
        what: &'static str,
        value: f32,
    },

    /// A quantity fell outside its allowed range
    OutOfRange {
        what: &'static str,
        value: f32,
        /// Human-readable description of the allowed range
        range: &'static str,
    },

    /// NaN or infinity in a configuration number
    NonFinite { what: &'static str },

    /// The border has three or more vertices but encloses no area
    DegenerateBorder { area: f32 },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NonPositive { what, value } => {
                write!(f, "{} must be positive, got {}", what, value)
            }
            SceneError::OutOfRange { what, value, range } => {
                write!(f, "{} = {} is outside {}", what, value, range)
            }
            SceneError::NonFinite { what } => write!(f, "{} is not a finite number", what),
            SceneError::DegenerateBorder { area } => {
                write!(f, "border polygon encloses no area (area {})", area)
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// Failure to load a scene configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the config file failed
    Io(std::io::Error),
    /// The file is not valid config JSON
    Json(serde_json::Error),
    /// The config parsed but describes an invalid scene
    Invalid(SceneError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read scene config: {}", e),
            ConfigError::Json(e) => write!(f, "failed to parse scene config: {}", e),
            ConfigError::Invalid(e) => write!(f, "invalid scene config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(e) => Some(e),
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
        ConfigError::Json(e)
    }
}

impl From<SceneError> for ConfigError {
    fn from(e: SceneError) -> Self {
        ConfigError::Invalid(e)
    }
}
