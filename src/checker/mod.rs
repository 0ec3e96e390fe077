use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::Result;
use crate::parser::extract_results_count;
use crate::search::SerpProvider;

/// Domain to result count, in configured order.
pub type ResultMap = IndexMap<String, u64>;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub checked_at: DateTime<Utc>,
    pub domains_checked: usize,
    pub domains_indexed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    fn from_results(results: &ResultMap, checked_at: DateTime<Utc>, elapsed: Duration) -> Self {
        Self {
            checked_at,
            domains_checked: results.len(),
            domains_indexed: results.values().filter(|count| **count != 0).count(),
            elapsed,
        }
    }
}

pub struct IndexChecker<P: SerpProvider> {
    provider: P,
}

impl<P: SerpProvider> IndexChecker<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn get_results_count(&self, domain: &str) -> Result<u64> {
        let results = self.provider.fetch(domain).await?;
        extract_results_count(domain, &results)
    }

    /// Query every domain in order. The first failure aborts the run.
    pub async fn check_domains(&self, domains: &[String]) -> Result<(ResultMap, RunSummary)> {
        let checked_at = Utc::now();
        let start = Instant::now();
        info!("Checking {} domains", domains.len());

        let mut results = ResultMap::with_capacity(domains.len());
        for domain in domains {
            let count = self.get_results_count(domain).await?;
            if results.insert(domain.clone(), count).is_some() {
                warn!("Duplicate domain {} overwrote an earlier result", domain);
            }
        }

        let summary = RunSummary::from_results(&results, checked_at, start.elapsed());
        info!(
            domains_checked = summary.domains_checked,
            domains_indexed = summary.domains_indexed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Domain check completed"
        );
        Ok((results, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexCheckError;
    use crate::search::MockSerpProvider;
    use mockall::predicate::eq;
    use serde_json::json;

    fn domains(names: &[&str]) -> Vec<String> {
        names.iter().map(|d| d.to_string()).collect()
    }

    #[tokio::test]
    async fn test_one_entry_per_domain_in_order() {
        let mut provider = MockSerpProvider::new();
        provider
            .expect_fetch()
            .with(eq("a.com"))
            .times(1)
            .returning(|_| Ok(json!({"general": {"results_cnt": 5}})));
        provider
            .expect_fetch()
            .with(eq("b.com"))
            .times(1)
            .returning(|_| Ok(json!({"general": {"empty": true}})));
        provider
            .expect_fetch()
            .with(eq("c.com"))
            .times(1)
            .returning(|_| Ok(json!({"general": {"results_cnt": 12}})));

        let checker = IndexChecker::new(provider);
        let list = domains(&["c.com", "a.com", "b.com"]);
        let (results, summary) = checker.check_domains(&list).await.unwrap();

        assert_eq!(results.len(), list.len());
        assert_eq!(
            results.keys().cloned().collect::<Vec<_>>(),
            vec!["c.com", "a.com", "b.com"]
        );
        assert_eq!(results["a.com"], 5);
        assert_eq!(results["b.com"], 0);
        assert_eq!(results["c.com"], 12);
        assert_eq!(summary.domains_checked, 3);
        assert_eq!(summary.domains_indexed, 2);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_domains() {
        let mut provider = MockSerpProvider::new();
        provider
            .expect_fetch()
            .with(eq("a.com"))
            .times(1)
            .returning(|_| Err(IndexCheckError::HttpStatus { status: 404, url: "x".into() }));
        provider.expect_fetch().with(eq("b.com")).times(0);

        let checker = IndexChecker::new(provider);
        let err = checker
            .check_domains(&domains(&["a.com", "b.com"]))
            .await
            .unwrap_err();
        assert!(matches!(err, IndexCheckError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_latent_gap_aborts_run() {
        let mut provider = MockSerpProvider::new();
        provider
            .expect_fetch()
            .returning(|_| Ok(json!({"general": {"empty": false}})));

        let checker = IndexChecker::new(provider);
        let err = checker.check_domains(&domains(&["a.com"])).await.unwrap_err();
        assert!(matches!(err, IndexCheckError::UnhandledEmptyStatus { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_domains_collapse() {
        let mut provider = MockSerpProvider::new();
        provider
            .expect_fetch()
            .times(2)
            .returning(|_| Ok(json!({"general": {"results_cnt": 1}})));

        let checker = IndexChecker::new(provider);
        let (results, _) = checker
            .check_domains(&domains(&["a.com", "a.com"]))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_domain_list() {
        let provider = MockSerpProvider::new();
        let checker = IndexChecker::new(provider);

        let (results, summary) = checker.check_domains(&[]).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(summary.domains_indexed, 0);
    }
}
