//! Configuration validation.
//!
//! Collects every problem in one pass so a bad deployment reports all of
//! them at once.

use crate::{AppConfig, DatabaseConfig, ObservabilityConfig, RedisConfig, ServerConfig};
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A port was set to zero.
    InvalidPort { name: &'static str },
    /// A required string setting is empty.
    Empty { name: &'static str },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// A pool must hold at least one connection.
    EmptyPool { name: &'static str },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: &'static str },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name } => write!(f, "Invalid port for {name}: must be 1-65535"),
            Self::Empty { name } => write!(f, "{name} cannot be empty"),
            Self::InvalidPoolSize { min, max } => write!(
                f,
                "Invalid pool size: min ({min}) cannot be greater than max ({max})"
            ),
            Self::EmptyPool { name } => write!(f, "{name} must be at least 1"),
            Self::NonPositiveTimeout { name } => write!(f, "Timeout '{name}' must be positive"),
            Self::InvalidLogLevel { value } => write!(
                f,
                "Invalid log level: '{value}' (valid: trace, debug, info, warn, error)"
            ),
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{value}' (valid: json, pretty)")
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    const VALID_LOG_FORMATS: &'static [&'static str] = &["json", "pretty"];

    /// Validates the entire application configuration.
    ///
    /// Returns every validation error found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&config.server, &mut errors);
        Self::validate_database(&config.database, &mut errors);
        Self::validate_redis(&config.redis, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort { name: "server.port" });
        }
        if config.host.trim().is_empty() {
            errors.push(ConfigValidationError::Empty { name: "server.host" });
        }
        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs",
            });
        }
    }

    fn validate_database(config: &DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        // An explicit URL carries host, port and name itself.
        if config.url.as_deref().map_or(true, str::is_empty) {
            if config.host.trim().is_empty() {
                errors.push(ConfigValidationError::Empty { name: "database.host" });
            }
            if config.name.trim().is_empty() {
                errors.push(ConfigValidationError::Empty { name: "database.name" });
            }
            if config.port == 0 {
                errors.push(ConfigValidationError::InvalidPort { name: "database.port" });
            }
        }

        if config.max_connections == 0 {
            errors.push(ConfigValidationError::EmptyPool {
                name: "database.max_connections",
            });
        }
        if config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs",
            });
        }
    }

    fn validate_redis(config: &RedisConfig, errors: &mut Vec<ConfigValidationError>) {
        if !config.enabled {
            return;
        }
        if config.url.as_deref().map_or(true, str::is_empty) && config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort { name: "redis.port" });
        }
        if config.pool_size == 0 {
            errors.push(ConfigValidationError::EmptyPool { name: "redis.pool_size" });
        }
    }

    fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }
        let format = config.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }
    }
}
