// shared helpers for the client tests
pub use axum::{Router, response::{IntoResponse, Response}};
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::{atomic::{AtomicUsize, Ordering}, Arc};

use axum::routing::get;
use http::StatusCode;
use reqwest::Client;
use url::Url;

use crate::client::NoclistClient;
use crate::resilience::retry::RetrySettings;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Serve `path` with `failures` HTTP 500 responses, then `success` forever.
/// The returned counter holds the number of requests the server has seen.
pub async fn spawn_flaky<F>(path: &str, failures: usize, success: F) -> (JoinHandle<()>, SocketAddr, Arc<AtomicUsize>)
where
    F: Fn() -> Response + Clone + Send + Sync + 'static,
{
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();
    let router = Router::new().route(path, get(move || {
        let c = counter_clone.clone();
        let success = success.clone();
        async move {
            let n = c.fetch_add(1, Ordering::SeqCst);
            if n < failures {
                (StatusCode::INTERNAL_SERVER_ERROR, "server error").into_response()
            } else {
                success()
            }
        }
    }));
    let (handle, addr) = spawn_axum(router).await;
    (handle, addr, counter)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn retry_settings(max_retries: u32) -> RetrySettings {
    RetrySettings { max_retries, base_delay_ms: 0, max_delay_ms: 0 }
}

pub fn client_for(base_url: &str, max_retries: u32) -> NoclistClient {
    let base_url = Url::parse(base_url).expect("base url");
    NoclistClient::new(build_reqwest_client(), base_url, retry_settings(max_retries))
}
