//! Configuration validation with aggregated errors.
//! All issues are collected into one Vec<String> instead of failing on the first.

use tracing::{error, info};
use url::Url;

use crate::config::settings::{LoggingConfig, RetryConfig, ServiceConfig, ServerConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_server(&cfg.settings.server, &mut errors);
    if let Some(retry) = &cfg.settings.retry {
        validate_retry(retry, &mut errors);
    }
    if let Some(logging) = &cfg.settings.logging {
        validate_logging(logging, &mut errors);
    }

    if errors.is_empty() {
        info!("config validation passed");
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn validate_server(server: &ServerConfig, errors: &mut Vec<String>) {
    match Url::parse(&server.base_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(format!(
                    "settings.server.base_url '{}' has unsupported scheme '{}'",
                    server.base_url,
                    url.scheme()
                ));
            }
            if url.cannot_be_a_base() {
                errors.push(format!("settings.server.base_url '{}' cannot be a base url", server.base_url));
            }
        }
        Err(e) => errors.push(format!("settings.server.base_url '{}' is invalid: {}", server.base_url, e)),
    }
}

fn validate_retry(retry: &RetryConfig, errors: &mut Vec<String>) {
    if let (Some(base), Some(max)) = (retry.base_delay_ms, retry.max_delay_ms) {
        if max < base {
            errors.push(format!(
                "settings.retry.max_delay_ms ({}) must be >= base_delay_ms ({})",
                max, base
            ));
        }
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "settings.logging.level '{}' must be one of {:?}",
            logging.level, LOG_LEVELS
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{LogFormat, SettingsConfig};

    fn config(base_url: &str, retry: Option<RetryConfig>, level: &str) -> ServiceConfig {
        ServiceConfig {
            settings: SettingsConfig {
                server: ServerConfig { base_url: base_url.to_owned() },
                retry,
                logging: Some(LoggingConfig::new(level.to_owned(), LogFormat::Compact)),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_service_config(&config("http://0.0.0.0:8888", None, "INFO")).is_ok());
    }

    #[test]
    fn test_errors_are_aggregated() {
        let retry = RetryConfig { max_retries: Some(1), base_delay_ms: Some(100), max_delay_ms: Some(10) };
        let errors = validate_service_config(&config("not a url", Some(retry), "loud")).unwrap_err();
        assert_eq!(errors.len(), 3, "{:?}", errors);
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let errors = validate_service_config(&config("mailto:someone@example.com", None, "info")).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("scheme")));
    }
}
