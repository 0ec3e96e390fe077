pub mod checker;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod search;
pub mod webhooks;

pub use checker::{IndexChecker, ResultMap, RunSummary};
pub use config::{ConfigManager, DomainList, FileConfigManager, Settings};
pub use error::{IndexCheckError, Result};
pub use report::IndexReport;
pub use search::{SerpClient, SerpProvider};
pub use webhooks::{SlackWebhook, WebhookProvider};

use tracing::info;

/// Check every domain, then post the indexed subset to the webhook.
///
/// Nothing is posted if any domain fails.
pub async fn run<P, W>(domains: &DomainList, provider: P, webhook: &W) -> Result<IndexReport>
where
    P: SerpProvider,
    W: WebhookProvider + ?Sized,
{
    let checker = IndexChecker::new(provider);
    let (results, _summary) = checker.check_domains(&domains.domains).await?;

    let report = IndexReport::from_results(&results);
    info!("{} of {} domains are indexed", report.indexed.len(), results.len());

    webhook.send_report(&report).await?;
    info!("Report posted to webhook");
    Ok(report)
}
