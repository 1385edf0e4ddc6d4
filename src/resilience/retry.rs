use http::StatusCode;
use reqwest::{RequestBuilder, Response};
use tokio::time::{sleep, Duration};
use tracing::{debug, error, warn};

use crate::client::errors::ClientError;
use crate::config::settings::RetryConfig;
use crate::observability::metrics::get_metrics;
use crate::helpers::time::get_instant;
use crate::utils::constants::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_RETRIES};

static OUTCOME_SUCCESS: &'static str = "success";
static OUTCOME_ERROR_STATUS: &'static str = "error_status";
static OUTCOME_TRANSPORT: &'static str = "transport";
static OUTCOME_EXHAUSTED: &'static str = "exhausted";

#[derive(Debug, Clone)]
pub struct RetrySettings {
    /// retries allowed after the initial attempt
    pub max_retries: u32,
    /// 0 disables the pause between attempts.
    /// will be mutiply by 2 on every attempt until max_delay_ms
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl From<&Option<RetryConfig>> for RetrySettings {
    fn from(retry: &Option<RetryConfig>) -> Self {
        Self {
            max_retries: retry.as_ref().and_then(|r| r.max_retries).unwrap_or(DEFAULT_MAX_RETRIES),
            base_delay_ms: retry.as_ref().and_then(|r| r.base_delay_ms).unwrap_or(DEFAULT_BASE_DELAY_MS),
            max_delay_ms: retry.as_ref().and_then(|r| r.max_delay_ms).unwrap_or(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetrySettings {
    /// Run the request produced by `request` until it returns a success status.
    ///
    /// `request` is called again for every attempt, so each retry sends a new request.
    /// - 2xx: returned as is
    /// - any other status: logged with its body, then retried
    /// - transport error: returned immediately, never retried
    ///
    /// Once the attempt counter passes `max_retries` the loop stops with
    /// [`ClientError::RetriesExhausted`] without sending anything else.
    pub async fn execute<F>(&self, endpoint: &str, mut request: F) -> Result<Response, ClientError>
    where
        F: FnMut() -> RequestBuilder,
    {
        let metrics = get_metrics().await;
        let mut delay = self.base_delay_ms;
        let mut last_status = StatusCode::OK;
        let mut attempt: u32 = 0;

        loop {
            if attempt > self.max_retries {
                error!("request to '{}' exceeded retry count ({} retries)", endpoint, self.max_retries);
                metrics.requests.with_label_values(&[endpoint, OUTCOME_EXHAUSTED]).inc();
                return Err(ClientError::RetriesExhausted {
                    endpoint: endpoint.to_owned(),
                    retries: self.max_retries,
                    last_status,
                });
            }

            debug!("sending request to '{}', attempt {}", endpoint, attempt);
            let start = get_instant();
            let sent = request().send().await;
            metrics.request_duration.with_label_values(&[endpoint]).observe(start.elapsed().as_secs_f64());

            let response = match sent {
                Ok(response) => response,
                Err(e) => {
                    error!("request to '{}' failed without a response: {}", endpoint, e);
                    metrics.requests.with_label_values(&[endpoint, OUTCOME_TRANSPORT]).inc();
                    return Err(ClientError::Transport(e));
                }
            };

            let status = response.status();
            if status.is_success() {
                metrics.requests.with_label_values(&[endpoint, OUTCOME_SUCCESS]).inc();
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            warn!(
                "error making request to '{}' (attempt {}/{}): status {}, body: {}",
                endpoint,
                attempt + 1,
                self.max_retries + 1,
                status,
                body
            );
            metrics.requests.with_label_values(&[endpoint, OUTCOME_ERROR_STATUS]).inc();
            metrics.retries.with_label_values(&[endpoint]).inc();

            last_status = status;
            attempt += 1;

            if delay > 0 && attempt <= self.max_retries {
                sleep(Duration::from_millis(delay)).await;
                delay = (delay * 2).min(self.max_delay_ms.max(self.base_delay_ms));
            }
        }
    }
}
