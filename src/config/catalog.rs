//! Catalog configuration: editions, drop phases, weight tables, roles.

use serde::Deserialize;

use crate::drops::{
    PhaseSchedule, DEFAULT_FIRST_PHASE_SIZE, DEFAULT_PHASE_GROWTH, DEFAULT_STATUS_LABELS,
};
use crate::edition::EditionSeed;
use crate::error::Result;

/// Default owner identity for a fresh deployment.
pub const DEFAULT_OWNER: &str = "owner";

/// The geographic edition forest, parents before children.
pub fn default_editions() -> Vec<EditionSeed> {
    [
        ("Welt", None),
        ("Europa", Some("Welt")),
        ("Nordamerika", Some("Welt")),
        ("Asien", Some("Welt")),
        ("Deutschland", Some("Europa")),
        ("England", Some("Europa")),
        ("USA", Some("Nordamerika")),
        ("China", Some("Asien")),
        ("Berlin", Some("Deutschland")),
        ("Düsseldorf", Some("Deutschland")),
        ("London", Some("England")),
        ("Oxford", Some("England")),
        ("NewYork", Some("USA")),
        ("LosAngeles", Some("USA")),
        ("Shanghai", Some("China")),
        ("Peking", Some("China")),
    ]
    .into_iter()
    .map(|(name, parent)| EditionSeed::new(name, parent))
    .collect()
}

/// Drop-phase schedule configuration.
///
/// Explicit `boundaries` win; otherwise phases grow geometrically from
/// `first_phase_size` by `phase_growth`, one phase per status label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DropConfig {
    pub status_labels: Vec<String>,
    pub first_phase_size: u64,
    pub phase_growth: u64,
    pub boundaries: Option<Vec<u64>>,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            status_labels: DEFAULT_STATUS_LABELS.iter().map(|s| s.to_string()).collect(),
            first_phase_size: DEFAULT_FIRST_PHASE_SIZE,
            phase_growth: DEFAULT_PHASE_GROWTH,
            boundaries: None,
        }
    }
}

impl DropConfig {
    pub fn schedule(&self) -> Result<PhaseSchedule> {
        match &self.boundaries {
            Some(boundaries) => PhaseSchedule::new(boundaries.clone(), self.status_labels.clone()),
            None => PhaseSchedule::geometric(
                self.first_phase_size,
                self.phase_growth,
                self.status_labels.clone(),
            ),
        }
    }
}

/// Owner and administrators.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub owner: String,
    pub administrators: Vec<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            administrators: Vec::new(),
        }
    }
}
