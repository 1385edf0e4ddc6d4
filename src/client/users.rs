use tracing::{debug, info};

use crate::client::checksum::request_url;
use crate::client::errors::ClientError;
use crate::client::NoclistClient;
use crate::utils::constants::{CHECKSUM_HEADER, USERS_PATH};

impl NoclistClient {
    /// Fetch the user list. Requires a prior `authenticate`.
    ///
    /// The checksum is computed once, before the first attempt, over the literal
    /// path `users` and reused for every retry.
    pub async fn fetch_users(&self) -> Result<Vec<String>, ClientError> {
        let checksum = self.checksum_for(USERS_PATH)?;
        let url = request_url(&self.base_url, USERS_PATH)?;
        let client = self.client.clone();

        let response = self
            .retry
            .execute(USERS_PATH, || {
                client
                    .get(url.clone())
                    .header(CHECKSUM_HEADER, checksum.as_str())
            })
            .await?;

        let body = response.text().await?;
        let users = parse_users(&body);
        info!("fetched {} users", users.len());
        debug!("users: {:?}", users);
        Ok(users)
    }
}

/// Split a response body into one entry per line, verbatim.
pub fn parse_users(body: &str) -> Vec<String> {
    body.split('\n').map(str::to_owned).collect()
}
