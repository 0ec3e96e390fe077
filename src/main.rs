use anyhow::Context;
use index_checker::config::{ConfigManager, FileConfigManager};
use index_checker::{SerpClient, SlackWebhook};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for the progress lines and the final report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config_manager = FileConfigManager::from_env();
    let settings = config_manager
        .load_settings()
        .await
        .with_context(|| format!("loading {:?}", config_manager.config_path()))?;
    let domains = config_manager
        .load_domains()
        .await
        .with_context(|| format!("loading {:?}", config_manager.domains_path()))?;

    tracing::info!("Starting index check");

    let provider = SerpClient::new(&settings)?;
    let webhook = SlackWebhook::new(settings.webhook_url.clone(), settings.request_timeout)?;

    let report = index_checker::run(&domains, provider, &webhook).await?;
    println!("{}", report.to_pretty_json()?);

    tracing::info!("Index check finished");
    Ok(())
}
