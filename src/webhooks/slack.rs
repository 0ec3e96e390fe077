use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::{IndexCheckError, Result};
use crate::webhooks::WebhookProvider;

/// Slack incoming webhook. One POST per message, no retry.
pub struct SlackWebhook {
    client: Client,
    webhook_url: String,
}

impl SlackWebhook {
    pub fn new(webhook_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexCheckError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    fn create_payload(text: &str) -> Value {
        json!({ "text": text })
    }

    async fn send_webhook(&self, payload: Value) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| IndexCheckError::Transport(format!("Failed to send webhook: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexCheckError::HttpStatus {
                status: status.as_u16(),
                url: self.webhook_url.clone(),
            });
        }

        debug!("Slack webhook sent successfully");
        Ok(())
    }
}

#[async_trait::async_trait]
impl WebhookProvider for SlackWebhook {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.send_webhook(Self::create_payload(text)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::ResultMap;
    use crate::report::IndexReport;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn webhook_for(server: &MockServer) -> SlackWebhook {
        SlackWebhook::new(format!("{}/hook", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_posts_report_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "text": " These domains have been indexed: {\n    \"a.com\": 5\n}"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let results: ResultMap = [("a.com".to_string(), 5), ("b.com".to_string(), 0)]
            .into_iter()
            .collect();
        let report = IndexReport::from_results(&results);

        webhook_for(&server).send_report(&report).await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = webhook_for(&server).send_text("hello").await.unwrap_err();
        assert!(matches!(err, IndexCheckError::HttpStatus { status: 500, .. }));
    }
}
