//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config and environment
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` wins over the configured level; `DEBUG=true` raises the default to debug

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{FrontendConfig, LogFormat};

/// Default filter directive derived from configuration.
pub fn default_directive(config: &FrontendConfig) -> String {
    let level = if config.debug {
        "debug"
    } else {
        config.observability.log_level.as_str()
    };
    format!("user_frontend={level},tower_http={level}")
}

/// Initialize the global tracing subscriber.
pub fn init_logging(config: &FrontendConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(config).into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.observability.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_raises_level() {
        let mut config = FrontendConfig::default();
        assert_eq!(default_directive(&config), "user_frontend=info,tower_http=info");

        config.debug = true;
        assert_eq!(default_directive(&config), "user_frontend=debug,tower_http=debug");
    }
}
