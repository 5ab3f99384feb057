//! Configuration loading from disk and the environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: '{value}'")]
    Env { key: &'static str, value: String },

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

/// Build the runtime configuration: defaults, then the optional file, then
/// process environment overrides.
pub fn load(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    load_with(path, |key| env::var(key).ok())
}

/// Same as [`load`] with an injectable variable lookup.
pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables on top of file/default values.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        config.listener.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.listener.port = parse_var("PORT", port)?;
    }
    if let Some(uri) = lookup("STORE_URI") {
        config.store.uri = uri;
    }
    if let Some(origin) = lookup("CORS_ORIGIN") {
        config.cors.allowed_origin = origin;
    }
    if let Some(strict) = lookup("STRICT_VALIDATION") {
        config.security.strict_validation = parse_var("STRICT_VALIDATION", strict)?;
    }
    if let Some(format) = lookup("LOG_FORMAT") {
        config.observability.log_format = parse_var("LOG_FORMAT", format)?;
    }
    Ok(())
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { key, value })
}
