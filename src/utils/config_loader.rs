use std::path::Path;
use anyhow::{anyhow, Result};
use tracing::warn;

use crate::config::proc_loader::file_to_config;
use crate::config::settings::ServiceConfig;

/// Load the config file, or fall back to defaults when it does not exist.
pub async fn run(config_path: &str) -> Result<ServiceConfig> {
    let path = Path::new(config_path);
    if !path.exists() {
        warn!("config file '{}' not found, using defaults", config_path);
        return crate::config::proc_loader::parse_config(String::new());
    }
    file_to_config(path).await.map_err(|e| anyhow!(format!("Invalid config format: {}", e)))
}
