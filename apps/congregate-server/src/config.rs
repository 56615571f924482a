//! Server configuration loaded from environment variables.
//!
//! Loading is fail-fast: the upstream credential pair must be present or
//! startup aborts naming every missing variable at once.

use thiserror::Error;

/// Default page size when a paginated request names none.
const DEFAULT_EVENTS_PER_PAGE: u64 = 3;

const DEFAULT_PORT: u16 = 3000;

/// The single origin the original deployment serves.
const DEFAULT_ALLOWED_ORIGIN: &str = "https://www.poa.church";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Runtime configuration, read once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Planning Center application id (Basic auth username).
    pub app_id: String,
    /// Planning Center secret (Basic auth password).
    pub secret: String,
    /// Default per-page value for the pagination normalizer.
    pub events_per_page: u64,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub rust_log: String,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let app_id = require("PCO_APP_ID", &mut missing);
        let secret = require("PCO_SECRET", &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired(missing.join(", ")));
        }

        Ok(Self {
            app_id: app_id.unwrap_or_default(),
            secret: secret.unwrap_or_default(),
            events_per_page: normalize_events_per_page(
                std::env::var("PCO_EVENTS_PER_PAGE").ok().as_deref(),
            ),
            port: parse_port(std::env::var("PORT").ok().as_deref())?,
            allowed_origins: parse_allowed_origins(
                std::env::var("CORS_ALLOWED_ORIGINS").ok().as_deref(),
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require(var: &str, missing: &mut Vec<String>) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => {
            missing.push(var.to_string());
            None
        }
    }
}

/// Non-numeric or non-positive values fall back to the default.
fn normalize_events_per_page(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_EVENTS_PER_PAGE)
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            var: "PORT".to_string(),
            message: format!("not a valid port: {value}"),
        }),
        None => Ok(DEFAULT_PORT),
    }
}

fn parse_allowed_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        vec![DEFAULT_ALLOWED_ORIGIN.to_string()]
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_per_page_defaults_and_validates() {
        assert_eq!(normalize_events_per_page(None), 3);
        assert_eq!(normalize_events_per_page(Some("abc")), 3);
        assert_eq!(normalize_events_per_page(Some("0")), 3);
        assert_eq!(normalize_events_per_page(Some("-2")), 3);
        assert_eq!(normalize_events_per_page(Some("12")), 12);
    }

    #[test]
    fn port_defaults_and_rejects_junk() {
        assert_eq!(parse_port(None).unwrap(), 3000);
        assert_eq!(parse_port(Some("8080")).unwrap(), 8080);
        assert!(parse_port(Some("not-a-port")).is_err());
    }

    #[test]
    fn allowed_origins_split_and_default() {
        assert_eq!(
            parse_allowed_origins(None),
            vec!["https://www.poa.church".to_string()]
        );
        assert_eq!(
            parse_allowed_origins(Some("https://a.test, https://b.test")),
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
        assert_eq!(
            parse_allowed_origins(Some(" , ")),
            vec!["https://www.poa.church".to_string()]
        );
    }
}
