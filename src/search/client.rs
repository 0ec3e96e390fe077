use reqwest::{Client, Proxy};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{IndexCheckError, Result};
use crate::search::{RetryPolicy, SerpProvider};

/// Queries the search endpoint through the authenticated proxy.
pub struct SerpClient {
    client: Client,
    search_url: String,
    retry: RetryPolicy,
}

impl SerpClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let credentials = settings.credentials();
        let proxy = Proxy::all(format!("http://{}:{}", settings.proxy_host, settings.proxy_port))
            .map_err(|e| IndexCheckError::Config(format!("Invalid proxy address: {}", e)))?
            .basic_auth(&credentials.username, &credentials.password);

        let client = Client::builder()
            .proxy(proxy)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| IndexCheckError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            proxy_host = %settings.proxy_host,
            proxy_port = settings.proxy_port,
            username = %credentials.username,
            "search.client.ready"
        );

        Ok(Self::with_client(
            client,
            settings.search_url.clone(),
            settings.retry.clone().into(),
        ))
    }

    /// Build around an existing client, e.g. one without a proxy.
    pub fn with_client(client: Client, search_url: String, retry: RetryPolicy) -> Self {
        Self {
            client,
            search_url,
            retry,
        }
    }

    pub fn query_params(domain: &str) -> [(&'static str, String); 2] {
        // lum_json=1 asks the proxy for parsed JSON instead of HTML
        [("q", format!("site:{}", domain)), ("lum_json", "1".to_string())]
    }

    pub async fn get_serp_results(&self, domain: &str) -> Result<Value> {
        let params = Self::query_params(domain);
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(
                domain,
                attempt,
                max_attempts = self.retry.max_attempts,
                "search.request.start"
            );

            let response = self
                .client
                .get(&self.search_url)
                .query(&params)
                .send()
                .await
                .map_err(|e| {
                    IndexCheckError::Transport(format!("Search request for {} failed: {}", domain, e))
                })?;

            let status = response.status();
            if status.is_success() {
                let body = response.bytes().await.map_err(|e| {
                    IndexCheckError::Transport(format!("Failed to read SERP body for {}: {}", domain, e))
                })?;
                let results: Value = serde_json::from_slice(&body).map_err(|e| {
                    IndexCheckError::Parse(format!("SERP response for {} is not valid JSON: {}", domain, e))
                })?;

                println!("Got SERP results for {}", domain);
                return Ok(results);
            }

            let code = status.as_u16();
            if self.retry.should_retry(code, attempt) {
                let delay = self.retry.backoff(attempt);
                warn!(
                    domain,
                    status = code,
                    attempt,
                    backoff_ms = delay.as_millis() as u64,
                    "search.retrying"
                );
                sleep(delay).await;
                continue;
            }

            if self.retry.status_forcelist.contains(&code) {
                return Err(IndexCheckError::RetriesExhausted {
                    status: code,
                    attempts: attempt,
                });
            }

            return Err(IndexCheckError::HttpStatus {
                status: code,
                url: self.search_url.clone(),
            });
        }
    }
}

#[async_trait::async_trait]
impl SerpProvider for SerpClient {
    async fn fetch(&self, domain: &str) -> Result<Value> {
        self.get_serp_results(domain).await
    }
}
