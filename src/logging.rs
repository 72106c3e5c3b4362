//! Logging setup for the simulator binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary. Output goes to stderr so rendered headers on stdout stay clean.

use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::error::{Result, StatusError};

/// Initialize logging based on configuration. `RUST_LOG` takes precedence
/// over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pump_status={}", level).into());

    let layer = {
        let base = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false);
        if config.json_format {
            base.json().boxed()
        } else {
            base.boxed()
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| StatusError::config(format!("Failed to initialize logging: {}", e)))?;

    info!(?level, json = config.json_format, "Logging initialized");
    Ok(())
}

pub fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        _ => Err(StatusError::config(format!(
            "Invalid log level: {}",
            level_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("Warning").unwrap(), Level::WARN);
        assert!(parse_log_level("verbose").is_err());
    }
}
