pub mod client;
pub mod retry;

use crate::error::Result;
use serde_json::Value;

pub use client::SerpClient;
pub use retry::RetryPolicy;

/// Source of raw SERP documents, one per domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SerpProvider: Send + Sync {
    async fn fetch(&self, domain: &str) -> Result<Value>;
}
