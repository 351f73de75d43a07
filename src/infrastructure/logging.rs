//! Tracing subscriber setup

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::DomainError;

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging(config: &LoggingConfig) -> Result<(), DomainError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            DomainError::configuration(format!("Invalid log level '{}': {}", config.level, e))
        })?;

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    };

    result.map_err(|e| DomainError::internal(format!("Logging already initialized: {}", e)))?;

    tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_rejected() {
        // SAFETY: no other test in this crate reads or writes RUST_LOG
        unsafe { std::env::remove_var("RUST_LOG") };

        let config = LoggingConfig {
            level: "contract_review_rag=loudest".to_string(),
            format: LogFormat::Pretty,
        };

        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }
}
