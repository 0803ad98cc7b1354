//! Pass records and owner identities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rarity::RankedLabel;

/// Sequential pass identifier, assigned from 0.
pub type PassId = u64;

/// Opaque owner identity (an address, account name, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OwnerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An issued pass.
///
/// Everything but `owner` is fixed at issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassRecord {
    /// Sequential id, never reused.
    pub id: PassId,
    /// Current holder.
    pub owner: OwnerId,
    /// Status tier of the phase the pass was issued in.
    pub status: RankedLabel,
    /// Edition credited after promotion.
    pub edition: String,
    /// Wonder drawn from the issuance seed.
    pub wonder: RankedLabel,
    /// Pattern drawn from the derived seed.
    pub pattern: RankedLabel,
}

impl PassRecord {
    /// The ranked attributes the owner index aggregates over.
    pub fn grades(&self) -> PassGrades {
        PassGrades {
            status: self.status.clone(),
            wonder: self.wonder.clone(),
        }
    }
}

/// Status and wonder of one pass, as tracked per owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassGrades {
    /// Status tier of the pass.
    pub status: RankedLabel,
    /// Wonder of the pass.
    pub wonder: RankedLabel,
}
