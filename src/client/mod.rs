//! BADSEC client: token state plus the signed operations built on it.
//!
//! Control flow is `authenticate` (stores the token) then `fetch_users`
//! (signs with the stored token). Every HTTP call goes through
//! [`RetrySettings::execute`].

pub mod auth;
pub mod checksum;
pub mod errors;
pub mod token;
pub mod users;

use reqwest::Client;
use url::Url;

use crate::client::errors::ClientError;
use crate::client::token::AuthToken;
use crate::config::settings::SettingsConfig;
use crate::resilience::retry::RetrySettings;

#[derive(Debug, Clone)]
pub struct NoclistClient {
    client: Client,
    base_url: Url,
    retry: RetrySettings,
    auth_token: Option<AuthToken>,
}

impl NoclistClient {
    pub fn new(client: Client, base_url: Url, retry: RetrySettings) -> Self {
        Self {
            client,
            base_url,
            retry,
            auth_token: None,
        }
    }

    /// Build a client from the loaded service settings.
    pub fn from_settings(client: Client, settings: &SettingsConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&settings.server.base_url)?;
        Ok(Self::new(client, base_url, RetrySettings::from(&settings.retry)))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry(&self) -> &RetrySettings {
        &self.retry
    }

    /// Current token, `None` until `authenticate` succeeds.
    pub fn token(&self) -> Option<&str> {
        self.auth_token.as_ref().map(|t| t.as_str())
    }

    /// Replace the stored token.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<(), ClientError> {
        self.auth_token = Some(AuthToken::new(token)?);
        Ok(())
    }

    fn require_token(&self) -> Result<&AuthToken, ClientError> {
        self.auth_token
            .as_ref()
            .ok_or(ClientError::Precondition("auth token not yet set"))
    }

    /// Checksum of `path` signed with the stored token.
    pub fn checksum_for(&self, path: &str) -> Result<String, ClientError> {
        let token = self.require_token()?;
        checksum::compute_checksum(token.as_str(), path)
    }
}
