//! # BADSEC Noclist Client Library
//!
//! Authenticates against the BADSEC server, signs requests with a per-path
//! checksum derived from the issued token, and fetches the user list with a
//! bounded retry policy.
//!
//! Modules:
//! - `client` — token state, checksum signing, auth and user list operations
//! - `resilience` — retry-bounded request executor
//! - `config` — service configuration, loading and validation
//! - `observability` — request metrics

pub mod client;
pub mod config;
pub mod resilience;
pub mod observability;
pub mod helpers;
pub mod utils;
#[cfg(test)]
mod tests;


pub use crate::client::NoclistClient;
pub use crate::client::checksum::{compute_checksum, request_url};
pub use crate::client::errors::ClientError;
pub use crate::config::settings::ServiceConfig;
pub use crate::resilience::retry::RetrySettings;
