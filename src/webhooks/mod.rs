pub mod slack;

use crate::error::Result;
use crate::report::IndexReport;

pub use slack::SlackWebhook;

#[async_trait::async_trait]
pub trait WebhookProvider: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<()>;

    async fn send_report(&self, report: &IndexReport) -> Result<()> {
        let text = report.message_text()?;
        self.send_text(&text).await
    }
}
