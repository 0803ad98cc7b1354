//! Weighted label selection.
//!
//! A table is an ordered list of `(label, cumulative upper bound)` pairs.
//! Selection reduces a random value modulo the total weight and picks the
//! first entry whose bound is strictly greater than the bucket.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Ladder, Rank, RankedLabel};
use crate::error::{EngineError, Result};

/// Domain tag mixed into the pattern seed so it never equals the wonder seed.
const PATTERN_SEED_TAG: &[u8] = b"wunderpass.pattern.v1";

/// Canonical wonder ladder, rarest first. Total weight 256.
pub const CANONICAL_WONDERS: [(&str, u32); 8] = [
    ("Pyramids of Giza", 1),
    ("Great Wall of China", 2),
    ("Petra", 4),
    ("Colosseum", 8),
    ("Chichen Itza", 16),
    ("Machu Picchu", 32),
    ("Taj Mahal", 64),
    ("Christ the Redeemer", 129),
];

/// Canonical pattern ladder, rarest first. Total weight 256.
pub const CANONICAL_PATTERNS: [(&str, u32); 8] = [
    ("Cosmic", 1),
    ("Aurora", 2),
    ("Marble", 4),
    ("Terrazzo", 8),
    ("Houndstooth", 16),
    ("Chevron", 32),
    ("Pinstripe", 64),
    ("Solid", 129),
];

/// A configured `(label, weight)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Label returned when this entry is selected.
    pub label: String,
    /// Relative weight; zero makes the label unreachable.
    pub weight: u32,
}

impl WeightEntry {
    pub fn new(label: impl Into<String>, weight: u32) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }

    /// Entries for a `(label, weight)` constant table.
    pub fn from_pairs(pairs: &[(&str, u32)]) -> Vec<WeightEntry> {
        pairs
            .iter()
            .map(|(label, weight)| WeightEntry::new(*label, *weight))
            .collect()
    }
}

/// Cumulative weight table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    name: String,
    entries: Vec<(String, u64)>,
}

impl WeightTable {
    /// Build a table from per-label weights.
    ///
    /// Fails with `EmptyTable` if the weights sum to zero.
    pub fn from_weights(name: impl Into<String>, weights: &[WeightEntry]) -> Result<Self> {
        let mut bound = 0u64;
        let entries = weights
            .iter()
            .map(|entry| {
                bound += u64::from(entry.weight);
                (entry.label.clone(), bound)
            })
            .collect();
        Self::from_cumulative(name, entries)
    }

    /// Build a table from cumulative bounds.
    ///
    /// Bounds must be non-decreasing; the last bound is the total weight.
    pub fn from_cumulative(name: impl Into<String>, entries: Vec<(String, u64)>) -> Result<Self> {
        let name = name.into();
        if entries.windows(2).any(|pair| pair[1].1 < pair[0].1) {
            return Err(EngineError::EmptyTable(format!(
                "{name} (cumulative bounds decrease)"
            )));
        }
        let table = Self { name, entries };
        if table.total_weight() == 0 {
            return Err(EngineError::EmptyTable(table.name));
        }
        Ok(table)
    }

    /// The canonical eight-rung wonder table.
    pub fn canonical_wonders() -> Self {
        Self::canonical("wonder", &CANONICAL_WONDERS)
    }

    /// The canonical eight-rung pattern table.
    pub fn canonical_patterns() -> Self {
        Self::canonical("pattern", &CANONICAL_PATTERNS)
    }

    fn canonical(name: &str, pairs: &[(&str, u32)]) -> Self {
        let mut bound = 0u64;
        let entries = pairs
            .iter()
            .map(|(label, weight)| {
                bound += u64::from(*weight);
                (label.to_string(), bound)
            })
            .collect();
        Self {
            name: name.to_string(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total weight `W`: the final cumulative bound.
    pub fn total_weight(&self) -> u64 {
        self.entries.last().map(|(_, bound)| *bound).unwrap_or(0)
    }

    /// Per-label weights, in table order.
    pub fn weights(&self) -> Vec<WeightEntry> {
        let mut previous = 0u64;
        self.entries
            .iter()
            .map(|(label, bound)| {
                let weight = (bound - previous) as u32;
                previous = *bound;
                WeightEntry::new(label.clone(), weight)
            })
            .collect()
    }

    /// Select a label for `random`.
    ///
    /// Pure: the same value always yields the same label.
    pub fn select(&self, random: u64) -> Result<RankedLabel> {
        let total = self.total_weight();
        if total == 0 {
            return Err(EngineError::EmptyTable(self.name.clone()));
        }
        let bucket = random % total;
        self.entries
            .iter()
            .position(|(_, bound)| *bound > bucket)
            .map(|index| RankedLabel::new(self.entries[index].0.clone(), Rank(index as u32)))
            .ok_or_else(|| EngineError::EmptyTable(self.name.clone()))
    }
}

impl Ladder for WeightTable {
    fn label_at(&self, rank: Rank) -> Option<&str> {
        self.entries.get(rank.index()).map(|(label, _)| label.as_str())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Derive the pattern seed from the wonder seed.
///
/// SHA-256 over a fixed tag and the big-endian seed; the first eight digest
/// bytes form the result. Wonder and pattern draws are therefore not the
/// same bucket of the same value.
pub fn derive_pattern_seed(seed: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(PATTERN_SEED_TAG);
    hasher.update(seed.to_be_bytes());
    let digest = hasher.finalize();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}
