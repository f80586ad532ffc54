//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (retry budget, addresses, log filter)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FrontendConfig → Result<(), Vec<ValidationError>>
//! - A zero retry budget is rejected here; the retry middleware itself still
//!   accepts it when constructed directly

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::FrontendConfig;

/// Upper bound on attempts per request.
pub const MAX_RETRIES_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("retry.max_retries must be at least 1")]
    ZeroRetries,

    #[error("retry.max_retries must be at most 100, got {0}")]
    TooManyRetries(u32),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),

    #[error("observability.log_level {0:?} is not a valid filter")]
    LogLevel(String),
}

pub fn validate_config(config: &FrontendConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.retry.max_retries {
        0 => errors.push(ValidationError::ZeroRetries),
        n if n > MAX_RETRIES_LIMIT => errors.push(ValidationError::TooManyRetries(n)),
        _ => {}
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::MetricsAddress(obs.metrics_address.clone()));
    }
    if EnvFilter::try_new(&obs.log_level).is_err() {
        errors.push(ValidationError::LogLevel(obs.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&FrontendConfig::default()).is_ok());
    }

    #[test]
    fn test_retry_bounds() {
        let mut config = FrontendConfig::default();
        config.retry.max_retries = 0;
        assert_eq!(validate_config(&config), Err(vec![ValidationError::ZeroRetries]));

        config.retry.max_retries = 101;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::TooManyRetries(101)])
        );

        config.retry.max_retries = 100;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = FrontendConfig::default();
        config.observability.metrics_address = "localhost".to_string();
        assert!(validate_config(&config).is_err());

        config.observability.metrics_enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut config = FrontendConfig::default();
        config.observability.log_level = "query_frontend=loud".to_string();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::LogLevel("query_frontend=loud".to_string())])
        );
    }
}
