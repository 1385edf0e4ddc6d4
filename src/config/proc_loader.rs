use std::path::Path;
use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::proc_validator;
use crate::config::settings::{LoggingConfig, ServiceConfig};

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = tokio::fs::read_to_string(path).await?;

    let expanded = expand_env_vars(&content)?;
    parse_config(expanded)
}

pub fn parse_config(content: String) -> Result<ServiceConfig> {
    // an empty document means "all defaults"
    let mut service_config: ServiceConfig = if content.trim().is_empty() {
        ServiceConfig::default()
    } else {
        serde_yaml::from_str(&content)
            .inspect_err(|e| error!("parse config error: {}", e))?
    };

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::default());
    }

    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config)
        .map_err(|errors| anyhow!("invalid config: {}", errors.join("; ")))?;

    Ok(service_config)
}

/// Replace `${VAR}` / `${VAR:default}` with environment values.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    Ok(re
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::LogFormat;
    use crate::utils::constants::DEFAULT_BASE_URL;
    use serial_test::serial;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config(String::new()).unwrap();
        assert_eq!(config.settings.server.base_url, DEFAULT_BASE_URL);
        assert!(config.settings.retry.is_none());
        let logging = config.settings.logging.unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
settings:
  server:
    base_url: "http://127.0.0.1:9999"
  retry:
    max_retries: 4
    base_delay_ms: 10
    max_delay_ms: 40
  logging:
    level: debug
    format: json
"#;
        let config = parse_config(yaml.to_owned()).unwrap();
        assert_eq!(config.settings.server.base_url, "http://127.0.0.1:9999");
        let retry = config.settings.retry.unwrap();
        assert_eq!(retry.max_retries, Some(4));
        assert_eq!(retry.max_delay_ms, Some(40));
        assert_eq!(config.settings.logging.unwrap().format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let yaml = r#"
settings:
  server:
    base_url: "ftp://example.com"
"#;
        let err = parse_config(yaml.to_owned()).unwrap_err();
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    #[serial]
    fn test_expand_env_vars() {
        std::env::set_var("NOCLIST_TEST_PORT", "7777");
        let expanded = expand_env_vars("http://${NOCLIST_TEST_HOST:localhost}:${NOCLIST_TEST_PORT}").unwrap();
        assert_eq!(expanded, "http://localhost:7777");
        std::env::remove_var("NOCLIST_TEST_PORT");
    }
}
