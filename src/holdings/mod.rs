//! Per-owner holdings and best-attribute aggregates.
//!
//! Additions update the cached best status and wonder with one comparison.
//! Removals rescan the remaining holdings, since the removed pass may have
//! been the only one at the best rank.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::pass::{OwnerId, PassGrades, PassId};
use crate::rarity::{rarer, rarest, RankedLabel};

/// Holdings of one owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerAggregate {
    held: Vec<PassId>,
    best_status: Option<RankedLabel>,
    best_wonder: Option<RankedLabel>,
}

impl OwnerAggregate {
    /// Held ids in the order they were added.
    pub fn held_ids(&self) -> &[PassId] {
        &self.held
    }

    pub fn best_status(&self) -> Option<&RankedLabel> {
        self.best_status.as_ref()
    }

    pub fn best_wonder(&self) -> Option<&RankedLabel> {
        self.best_wonder.as_ref()
    }

    fn add(&mut self, id: PassId, grades: &PassGrades) {
        self.held.push(id);
        self.best_status = Some(rarer(self.best_status.take(), &grades.status));
        self.best_wonder = Some(rarer(self.best_wonder.take(), &grades.wonder));
    }
}

/// Index of holdings for every owner.
#[derive(Debug, Clone, Default)]
pub struct OwnerIndex {
    owners: HashMap<OwnerId, OwnerAggregate>,
    grades: HashMap<PassId, PassGrades>,
}

impl OwnerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly issued pass for `owner`.
    pub fn on_issued(&mut self, owner: &OwnerId, id: PassId, grades: PassGrades) {
        self.owners.entry(owner.clone()).or_default().add(id, &grades);
        self.grades.insert(id, grades);
        debug!(%owner, id, "Pass added to holdings");
    }

    /// Move pass `id` from `from` to `to`.
    ///
    /// Fails without changes if the pass is unknown or not held by `from`.
    pub fn on_transferred(&mut self, from: &OwnerId, to: &OwnerId, id: PassId) -> Result<()> {
        let grades = self
            .grades
            .get(&id)
            .cloned()
            .ok_or(EngineError::UnknownPass(id))?;
        let position = self
            .owners
            .get(from)
            .and_then(|aggregate| aggregate.held.iter().position(|held| *held == id))
            .ok_or_else(|| EngineError::NotOwner {
                id,
                owner: from.to_string(),
            })?;

        if let Some(source) = self.owners.get_mut(from) {
            source.held.remove(position);
            let (status, wonder) = Self::rescan(&self.grades, &source.held);
            source.best_status = status;
            source.best_wonder = wonder;
        }
        self.owners.entry(to.clone()).or_default().add(id, &grades);

        debug!(%from, %to, id, "Pass moved between holdings");
        Ok(())
    }

    fn rescan(
        grades: &HashMap<PassId, PassGrades>,
        held: &[PassId],
    ) -> (Option<RankedLabel>, Option<RankedLabel>) {
        let held_grades: Vec<&PassGrades> = held.iter().filter_map(|id| grades.get(id)).collect();
        (
            rarest(held_grades.iter().map(|g| &g.status)),
            rarest(held_grades.iter().map(|g| &g.wonder)),
        )
    }

    /// Held ids of `owner`, in insertion order. Empty for unknown owners.
    pub fn held_ids_of(&self, owner: &OwnerId) -> &[PassId] {
        self.owners
            .get(owner)
            .map(OwnerAggregate::held_ids)
            .unwrap_or(&[])
    }

    pub fn best_status_of(&self, owner: &OwnerId) -> Option<&RankedLabel> {
        self.owners.get(owner).and_then(OwnerAggregate::best_status)
    }

    pub fn best_wonder_of(&self, owner: &OwnerId) -> Option<&RankedLabel> {
        self.owners.get(owner).and_then(OwnerAggregate::best_wonder)
    }

    pub fn aggregate_of(&self, owner: &OwnerId) -> Option<&OwnerAggregate> {
        self.owners.get(owner)
    }
}
