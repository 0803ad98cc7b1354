//! Rarity ranking shared by status, wonder and pattern.
//!
//! Every attribute of a pass sits on a ladder where a lower rank is rarer:
//! table index 0 for wonders and patterns, phase 0 for status. An owner's
//! "best" attribute is the one with the lowest rank they hold.

pub mod weights;

use std::fmt;

use serde::Serialize;

pub use weights::{derive_pattern_seed, WeightEntry, WeightTable};

/// Position on a rarity ladder. Lower is rarer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rank(pub u32);

impl Rank {
    /// The rarest rank on any ladder.
    pub const RAREST: Rank = Rank(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A label drawn from a ladder together with its rank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RankedLabel {
    /// Display label, e.g. `"Petra"`.
    pub label: String,
    /// Position on its ladder; lower is rarer.
    pub rank: Rank,
}

impl RankedLabel {
    pub fn new(label: impl Into<String>, rank: Rank) -> Self {
        Self {
            label: label.into(),
            rank,
        }
    }

    /// True if `self` is strictly rarer than `other`.
    pub fn is_rarer_than(&self, other: &RankedLabel) -> bool {
        self.rank < other.rank
    }
}

impl fmt::Display for RankedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Keep the rarer of an incumbent best and a challenger.
///
/// Ties keep the incumbent.
pub fn rarer(current: Option<RankedLabel>, challenger: &RankedLabel) -> RankedLabel {
    match current {
        Some(best) if !challenger.is_rarer_than(&best) => best,
        _ => challenger.clone(),
    }
}

/// Rarest label in a collection, or `None` if it is empty.
pub fn rarest<'a, I>(labels: I) -> Option<RankedLabel>
where
    I: IntoIterator<Item = &'a RankedLabel>,
{
    labels
        .into_iter()
        .fold(None, |best, label| Some(rarer(best, label)))
}

/// An ordered set of labels, rarest first.
pub trait Ladder {
    /// Label at `rank`, if the ladder has that many rungs.
    fn label_at(&self, rank: Rank) -> Option<&str>;

    /// Number of rungs.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ranked label at `rank`.
    fn ranked(&self, rank: Rank) -> Option<RankedLabel> {
        self.label_at(rank).map(|label| RankedLabel::new(label, rank))
    }
}
