//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{FrontendConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, overlay the process
/// environment, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<FrontendConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => FrontendConfig::default(),
    };

    apply_env(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay recognised environment variables onto `config`.
///
/// `lookup` returns the value of a variable, if set.
pub fn apply_env<F>(config: &mut FrontendConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("API_BASE_URL") {
        config.backend.api_base_url = url.trim().to_string();
    }

    if let Some(secret) = lookup("SECRET_KEY").filter(|s| !s.is_empty()) {
        config.session.secret_key = Some(secret);
    }

    if let Some(port) = lookup("PORT") {
        config.listener.port = port.trim().parse().map_err(|e| ConfigError::Env {
            var: "PORT",
            reason: format!("'{}': {}", port, e),
        })?;
    }

    if let Some(debug) = lookup("DEBUG") {
        config.debug = debug.trim().eq_ignore_ascii_case("true");
    }

    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level;
    }

    if let Some(format) = lookup("LOG_FORMAT") {
        config.observability.log_format = match format.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            other => {
                return Err(ConfigError::Env {
                    var: "LOG_FORMAT",
                    reason: format!("unknown format '{}'", other),
                })
            }
        };
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = FrontendConfig::default();
        apply_env(
            &mut config,
            env(&[
                ("API_BASE_URL", "http://api:5000"),
                ("SECRET_KEY", "s3cret"),
                ("PORT", "9000"),
                ("DEBUG", "True"),
            ]),
        )
        .unwrap();

        assert_eq!(config.backend.api_base_url, "http://api:5000");
        assert_eq!(config.session.secret_key.as_deref(), Some("s3cret"));
        assert_eq!(config.listener.port, 9000);
        assert!(config.debug);
    }

    #[test]
    fn test_base_url_whitespace_trimmed() {
        let mut config = FrontendConfig::default();
        apply_env(&mut config, env(&[("API_BASE_URL", "  http://api:5000\n")])).unwrap();
        assert_eq!(config.backend.api_base_url, "http://api:5000");
    }

    #[test]
    fn test_debug_only_true_enables() {
        let mut config = FrontendConfig::default();
        apply_env(&mut config, env(&[("DEBUG", "1")])).unwrap();
        assert!(!config.debug);
    }

    #[test]
    fn test_empty_secret_ignored() {
        let mut config = FrontendConfig::default();
        apply_env(&mut config, env(&[("SECRET_KEY", "")])).unwrap();
        assert!(config.session.secret_key.is_none());
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut config = FrontendConfig::default();
        let err = apply_env(&mut config, env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "PORT", .. }));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = FrontendConfig::default();
        let err = apply_env(&mut config, env(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "LOG_FORMAT", .. }));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::MissingBaseUrl,
            ValidationError::ZeroTimeout,
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: API_BASE_URL is required, backend timeout must be greater than zero"
        );
    }
}
