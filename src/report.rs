//! Distribution report over issued passes.
//!
//! Tallies how often each status, pattern, wonder and edition occurs, most
//! common first, alongside a compact listing of the passes themselves.

use std::collections::HashMap;

use serde::Serialize;

use crate::pass::{PassId, PassRecord};

/// Occurrences of one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// Per-attribute frequency tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distributions {
    pub status: Vec<LabelCount>,
    pub pattern: Vec<LabelCount>,
    pub wonder: Vec<LabelCount>,
    pub edition: Vec<LabelCount>,
}

/// One pass, flattened to its labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub id: PassId,
    pub owner: String,
    pub status: String,
    pub pattern: String,
    pub wonder: String,
    pub edition: String,
}

impl From<&PassRecord> for PassSummary {
    fn from(record: &PassRecord) -> Self {
        Self {
            id: record.id,
            owner: record.owner.to_string(),
            status: record.status.label.clone(),
            pattern: record.pattern.label.clone(),
            wonder: record.wonder.label.clone(),
            edition: record.edition.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DistributionReport {
    pub distributions: Distributions,
    pub passes: Vec<PassSummary>,
}

impl DistributionReport {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PassRecord>,
    {
        let passes: Vec<PassSummary> = records.into_iter().map(PassSummary::from).collect();
        let distributions = Distributions {
            status: tally(passes.iter().map(|p| p.status.as_str())),
            pattern: tally(passes.iter().map(|p| p.pattern.as_str())),
            wonder: tally(passes.iter().map(|p| p.wonder.as_str())),
            edition: tally(passes.iter().map(|p| p.edition.as_str())),
        };
        Self {
            distributions,
            passes,
        }
    }

    pub fn total(&self) -> usize {
        self.passes.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Count labels, most common first, ties broken by label.
fn tally<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    let mut sorted: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    sorted
}
