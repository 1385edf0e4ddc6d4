use tracing::info;

use crate::client::checksum::request_url;
use crate::client::errors::ClientError;
use crate::client::token::AuthToken;
use crate::client::NoclistClient;
use crate::utils::constants::{AUTH_PATH, AUTH_TOKEN_HEADER};

impl NoclistClient {
    /// Fetch a fresh token from the auth endpoint and store it, replacing any previous one.
    ///
    /// Error statuses are retried by the executor. A successful response without
    /// the token header is a protocol violation and is not retried.
    pub async fn authenticate(&mut self) -> Result<(), ClientError> {
        let url = request_url(&self.base_url, AUTH_PATH)?;
        let client = self.client.clone();

        let response = self
            .retry
            .execute(AUTH_PATH, || client.get(url.clone()))
            .await?;

        let token = response
            .headers()
            .get(AUTH_TOKEN_HEADER)
            .ok_or_else(|| ClientError::ProtocolViolation("auth response does not contain token".to_owned()))?
            .to_str()
            .map_err(|e| ClientError::ProtocolViolation(format!("auth token header is not valid text: {}", e)))?;

        let token = AuthToken::new(token)
            .map_err(|_| ClientError::ProtocolViolation("auth response carries an empty token".to_owned()))?;

        info!("authenticated against {}", url);
        self.auth_token = Some(token);
        Ok(())
    }
}
