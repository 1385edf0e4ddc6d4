//! Shared constants and invariants

pub const DEFAULT_CONFIG_PATH: &str = "noclist.yaml";
pub const DEFAULT_BASE_URL: &str = "http://0.0.0.0:8888";
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_BASE_DELAY_MS: u64 = 0;
pub const DEFAULT_MAX_DELAY_MS: u64 = 0;

// Service endpoints, relative to the base url
pub const AUTH_PATH: &str = "auth";
pub const USERS_PATH: &str = "users";

// Headers
pub const AUTH_TOKEN_HEADER: &str = "badsec-authentication-token";
pub const CHECKSUM_HEADER: &str = "X-Request-Checksum";
