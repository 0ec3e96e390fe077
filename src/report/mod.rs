use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::checker::ResultMap;
use crate::error::Result;

pub const MESSAGE_PREFIX: &str = " These domains have been indexed: ";

/// The indexed subset of a run: every domain with a nonzero count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IndexReport {
    pub indexed: ResultMap,
}

impl IndexReport {
    pub fn from_results(results: &ResultMap) -> Self {
        let indexed = results
            .iter()
            .filter(|(_, count)| **count != 0)
            .map(|(domain, count)| (domain.clone(), *count))
            .collect();
        Self { indexed }
    }

    pub fn is_empty(&self) -> bool {
        self.indexed.is_empty()
    }

    /// JSON object indented with four spaces.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn message_text(&self) -> Result<String> {
        Ok(format!("{}{}", MESSAGE_PREFIX, self.to_pretty_json()?))
    }
}
