//! Status tiers: one label per drop phase.

use crate::rarity::{Ladder, Rank, RankedLabel};

use super::DropState;

/// Default status labels, earliest phase first.
pub const DEFAULT_STATUS_LABELS: [&str; 9] = [
    "Diamond", "Black", "Pearl", "Platinum", "Ruby", "Gold", "Silver", "Bronze", "White",
];

/// Ordered status labels; phase `p` issues label `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTiers {
    labels: Vec<String>,
}

impl Default for StatusTiers {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_LABELS.iter().map(|s| s.to_string()).collect())
    }
}

impl StatusTiers {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Status stamped on a pass issued while the gate is in `state`.
    ///
    /// Depends only on the phase index, never on the pass's position within
    /// the phase. Phases past the last label reuse the last label.
    pub fn status_for(&self, state: &DropState) -> Option<RankedLabel> {
        let phase = state.phase();
        let index = phase.min(self.labels.len().saturating_sub(1) as u32);
        self.ranked(Rank(index))
    }
}

impl Ladder for StatusTiers {
    fn label_at(&self, rank: Rank) -> Option<&str> {
        self.labels.get(rank.index()).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}
