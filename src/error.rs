//! Error types for pump status formatting.
//!
//! The classifiers and the duration formatter are total and never fail;
//! errors come from building readings out of raw values and from loading
//! configuration.

use thiserror::Error;

/// Result type alias for pump status operations
pub type Result<T> = std::result::Result<T, StatusError>;

#[derive(Debug, Error)]
pub enum StatusError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A configuration value outside its allowed range
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// A raw pump reading outside its documented domain
    #[error("Invalid reading: {message}")]
    InvalidReading { message: String },

    /// An event replay that could not proceed
    #[error("Replay error at step {step}: {message}")]
    Replay { step: usize, message: String },
}

impl StatusError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        StatusError::Config {
            message: message.into(),
        }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        StatusError::Io {
            message: message.into(),
        }
    }

    pub fn serialization<S: Into<String>>(message: S) -> Self {
        StatusError::Serialization {
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        StatusError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_reading<S: Into<String>>(message: S) -> Self {
        StatusError::InvalidReading {
            message: message.into(),
        }
    }

    pub fn replay<S: Into<String>>(step: usize, message: S) -> Self {
        StatusError::Replay {
            step,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StatusError {
    fn from(err: std::io::Error) -> Self {
        StatusError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for StatusError {
    fn from(err: serde_yaml::Error) -> Self {
        StatusError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = StatusError::validation("thresholds.battery", "critical exceeds warning");
        assert_eq!(
            err.to_string(),
            "Validation error: thresholds.battery - critical exceeds warning"
        );
        assert_eq!(
            StatusError::invalid_reading("bad").to_string(),
            "Invalid reading: bad"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: StatusError = io.into();
        assert!(matches!(err, StatusError::Io { .. }));
    }
}
