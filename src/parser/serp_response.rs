use serde_json::Value;
use tracing::debug;

use crate::error::{IndexCheckError, Result};

/// What the `general.empty` field of a SERP document says.
#[derive(Debug, Clone, PartialEq)]
pub enum EmptyStatus {
    Absent,
    Present(Value),
}

impl EmptyStatus {
    pub fn from_general(general: &serde_json::Map<String, Value>) -> Self {
        match general.get("empty") {
            Some(value) => EmptyStatus::Present(value.clone()),
            None => EmptyStatus::Absent,
        }
    }
}

fn general_section<'a>(domain: &str, results: &'a Value) -> Result<&'a serde_json::Map<String, Value>> {
    results
        .get("general")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            IndexCheckError::Parse(format!("SERP response for {} has no 'general' object", domain))
        })
}

/// Turn a SERP document into the number of indexed results for `domain`.
///
/// `{"general": {"empty": true}}` counts as zero. Without an `empty` key the
/// count comes from `general.results_cnt`. An `empty` key holding anything
/// other than `true` has no defined count: the raw value is printed and
/// [`IndexCheckError::UnhandledEmptyStatus`] is returned.
pub fn extract_results_count(domain: &str, results: &Value) -> Result<u64> {
    let general = general_section(domain, results)?;

    match EmptyStatus::from_general(general) {
        EmptyStatus::Present(Value::Bool(true)) => {
            println!("{} has no results \n", domain);
            Ok(0)
        }
        EmptyStatus::Present(value) => {
            println!("{}", value);
            Err(IndexCheckError::UnhandledEmptyStatus {
                domain: domain.to_string(),
                value,
            })
        }
        EmptyStatus::Absent => {
            let raw = general.get("results_cnt").ok_or_else(|| {
                IndexCheckError::Parse(format!(
                    "SERP response for {} has neither 'empty' nor 'results_cnt'",
                    domain
                ))
            })?;
            let count = raw.as_u64().ok_or_else(|| {
                IndexCheckError::Parse(format!(
                    "results_cnt for {} is not a non-negative integer: {}",
                    domain, raw
                ))
            })?;

            debug!(domain, count, "serp.results_cnt");
            println!("{} has {} results \n", domain, count);
            Ok(count)
        }
    }
}
