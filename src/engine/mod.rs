//! Issuance orchestrator.
//!
//! `IssuanceEngine` owns all mutable state: edition counters, the drop gate
//! and global counter, issued passes, and owner holdings. Every write goes
//! through `&mut self`, so operations are serialized by construction. Each
//! operation validates first and mutates only once nothing can fail.

mod builder;


use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::access::{AccessControl, RoleRegistry};
use crate::config::{Config, ConfigError};
use crate::drops::{DropGate, DropState, PhaseSchedule};
use crate::edition::{EditionRegistry, PromotionPolicy};
use crate::error::{EngineError, Result};
use crate::events::{EventSink, PassEvent};
use crate::holdings::OwnerIndex;
use crate::pass::{OwnerId, PassId, PassRecord};
use crate::randomness::RandomnessSource;
use crate::rarity::{derive_pattern_seed, RankedLabel, WeightTable};

pub use builder::EngineBuilder;

/// The rarity & distribution engine.
pub struct IssuanceEngine<A: AccessControl = RoleRegistry> {
    editions: EditionRegistry,
    promotion: PromotionPolicy,
    gate: DropGate,
    wonders: WeightTable,
    patterns: WeightTable,
    holdings: OwnerIndex,
    passes: Vec<PassRecord>,
    next_id: PassId,
    access: A,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl<A: AccessControl> std::fmt::Debug for IssuanceEngine<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuanceEngine")
            .field("editions", &self.editions.len())
            .field("promotion", &self.promotion)
            .field("gate", &self.gate)
            .field("next_id", &self.next_id)
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

impl IssuanceEngine<RoleRegistry> {
    /// Engine over the configured catalog.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        Ok(EngineBuilder::from_config(config)?.build()?)
    }
}

impl<A: AccessControl> IssuanceEngine<A> {
    /// Builder over the canonical catalog, administered by `access`.
    pub fn builder(access: A) -> EngineBuilder<A> {
        EngineBuilder::new(access)
    }

    // ========================================================================
    // Issuance
    // ========================================================================

    /// Issue one pass to `owner`, requested under edition `requested`.
    ///
    /// `seed` drives the wonder draw directly and the pattern draw through
    /// [`derive_pattern_seed`]. Fails with `MintingPaused` while the gate is
    /// closed and `UnknownEdition` for unregistered editions; on failure
    /// nothing changes and no id is consumed.
    pub fn issue(&mut self, requested: &str, seed: u64, owner: &OwnerId) -> Result<PassRecord> {
        self.gate.ensure_open()?;

        let edition = self
            .editions
            .resolve_for_issuance(requested, &self.promotion)?
            .to_string();
        let status = self.gate.current_status().ok_or_else(|| {
            EngineError::InvalidSchedule(format!(
                "no status label for phase {}",
                self.gate.state().phase()
            ))
        })?;
        let wonder = self.wonders.select(seed)?;
        let pattern = self.patterns.select(derive_pattern_seed(seed))?;

        self.editions.credit(&edition)?;
        let id = self.next_id;
        self.next_id += 1;
        let closed = self.gate.record_issue();

        let record = PassRecord {
            id,
            owner: owner.clone(),
            status,
            edition,
            wonder,
            pattern,
        };
        self.holdings.on_issued(owner, id, record.grades());
        self.passes.push(record.clone());

        if record.edition != requested {
            debug!(id, requested, credited = %record.edition, "Issuance promoted");
        }
        info!(
            id,
            owner = %owner,
            edition = %record.edition,
            status = %record.status,
            wonder = %record.wonder,
            pattern = %record.pattern,
            "Pass issued"
        );

        self.publish(PassEvent::minted(record.clone()));
        if let Some(DropState::Paused { phase, reason }) = closed {
            self.publish(PassEvent::DropPaused { phase, reason });
        }
        Ok(record)
    }

    /// Issue one pass with a seed drawn from `source`.
    ///
    /// No seed is drawn while minting is paused.
    pub fn issue_from<R>(
        &mut self,
        source: &mut R,
        requested: &str,
        owner: &OwnerId,
    ) -> Result<PassRecord>
    where
        R: RandomnessSource + ?Sized,
    {
        self.gate.ensure_open()?;
        let seed = source.next_seed();
        self.issue(requested, seed, owner)
    }

    // ========================================================================
    // Transfer notification
    // ========================================================================

    /// Record that pass `id` moved from `from` to `to`.
    ///
    /// Called by the ownership collaborator after it has completed a
    /// transfer. Fails without changes if `from` does not hold the pass.
    pub fn on_transferred(&mut self, from: &OwnerId, to: &OwnerId, id: PassId) -> Result<()> {
        let record = self.record_by_id(id)?;
        if &record.owner != from {
            warn!(id, %from, owner = %record.owner, "Transfer rejected: not the holder");
            return Err(EngineError::NotOwner {
                id,
                owner: from.to_string(),
            });
        }

        self.holdings.on_transferred(from, to, id)?;
        if let Some(record) = self.passes.get_mut(id as usize) {
            record.owner = to.clone();
        }

        self.publish(PassEvent::Transferred {
            id,
            from: from.clone(),
            to: to.clone(),
        });
        Ok(())
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Register editions. Existing names keep their parent and counter.
    pub fn register_editions(
        &mut self,
        caller: &OwnerId,
        names: &[String],
        parents: &[Option<String>],
    ) -> Result<usize> {
        self.access.require_administrator(caller)?;
        self.editions.register(names, parents)
    }

    /// Set the cap on the requested edition. Higher rungs scale by the policy's growth.
    pub fn set_promotion_threshold(&mut self, caller: &OwnerId, threshold: u64) -> Result<()> {
        self.access.require_administrator(caller)?;
        info!(%caller, threshold, "Promotion threshold updated");
        self.promotion.threshold = threshold;
        Ok(())
    }

    /// Replace the phase boundaries and status labels.
    pub fn set_phase_schedule(&mut self, caller: &OwnerId, schedule: PhaseSchedule) -> Result<()> {
        self.access.require_administrator(caller)?;
        self.gate.set_schedule(schedule)
    }

    /// Close minting without changing the phase. No-op while paused.
    pub fn force_pause(&mut self, caller: &OwnerId) -> Result<DropState> {
        self.access.require_administrator(caller)?;
        if let Some(DropState::Paused { phase, reason }) = self.gate.pause() {
            self.publish(PassEvent::DropPaused { phase, reason });
        }
        Ok(self.gate.state())
    }

    /// Reopen minting. After a phase boundary this starts the next phase;
    /// after an operator pause the phase is unchanged. No-op while open.
    pub fn force_resume(&mut self, caller: &OwnerId) -> Result<DropState> {
        self.access.require_administrator(caller)?;
        if let Some(DropState::Open { phase }) = self.gate.resume() {
            self.publish(PassEvent::DropResumed { phase });
        }
        Ok(self.gate.state())
    }

    /// Register an event sink.
    pub fn subscribe(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    fn publish(&self, event: PassEvent) {
        for sink in &self.sinks {
            sink.publish(&event);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Passes credited to `edition`. Fails with `UnknownEdition`.
    pub fn counter_of(&self, edition: &str) -> Result<u64> {
        self.editions.counter_of(edition)
    }

    /// Status the next issuance would receive in the current phase.
    pub fn status_for(&self) -> Option<RankedLabel> {
        self.gate.current_status()
    }

    /// Ids held by `owner`, in the order they arrived. Empty for unknown owners.
    pub fn held_ids_of(&self, owner: &OwnerId) -> &[PassId] {
        self.holdings.held_ids_of(owner)
    }

    /// Rarest status among the passes `owner` holds.
    pub fn best_status_of(&self, owner: &OwnerId) -> Option<&RankedLabel> {
        self.holdings.best_status_of(owner)
    }

    /// Rarest wonder among the passes `owner` holds.
    pub fn best_wonder_of(&self, owner: &OwnerId) -> Option<&RankedLabel> {
        self.holdings.best_wonder_of(owner)
    }

    /// Issued pass `id`. Fails with `UnknownPass`.
    ///
    /// ```
    /// use wunderpass::{EngineError, IssuanceEngine, OwnerId, RoleRegistry};
    ///
    /// let mut engine = IssuanceEngine::builder(RoleRegistry::new("owner"))
    ///     .build()
    ///     .unwrap();
    /// let alice = OwnerId::from("alice");
    /// engine.issue("Berlin", 3, &alice).unwrap();
    ///
    /// let record = engine.record_by_id(0).unwrap();
    /// assert_eq!(record.wonder.label, "Petra");
    /// assert_eq!(engine.best_wonder_of(&alice), Some(&record.wonder));
    /// assert_eq!(engine.held_ids_of(&alice), &[0]);
    /// assert_eq!(engine.record_by_id(1), Err(EngineError::UnknownPass(1)));
    /// ```
    pub fn record_by_id(&self, id: PassId) -> Result<&PassRecord> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.passes.get(index))
            .ok_or(EngineError::UnknownPass(id))
    }

    /// Id the next successful issuance will receive.
    pub fn current_id(&self) -> PassId {
        self.next_id
    }

    /// Global number of passes issued.
    pub fn issued(&self) -> u64 {
        self.gate.issued()
    }

    /// Current phase and whether minting is open.
    pub fn drop_state(&self) -> DropState {
        self.gate.state()
    }

    /// True while issuance is rejected with `MintingPaused`.
    pub fn is_paused(&self) -> bool {
        !self.gate.state().is_open()
    }

    /// Cap on the requested edition before promotion kicks in.
    pub fn promotion_threshold(&self) -> u64 {
        self.promotion.threshold
    }

    /// Threshold and per-rung growth used when resolving editions.
    pub fn promotion_policy(&self) -> PromotionPolicy {
        self.promotion
    }

    /// Phase boundaries and status labels in force.
    pub fn phase_schedule(&self) -> &PhaseSchedule {
        self.gate.schedule()
    }

    /// The edition forest and its counters.
    pub fn editions(&self) -> &EditionRegistry {
        &self.editions
    }

    /// Table wonders are drawn from.
    pub fn wonder_table(&self) -> &WeightTable {
        &self.wonders
    }

    /// Table patterns are drawn from.
    pub fn pattern_table(&self) -> &WeightTable {
        &self.patterns
    }

    /// All issued passes, by id.
    pub fn passes(&self) -> &[PassRecord] {
        &self.passes
    }

    /// Per-owner holdings and aggregates.
    pub fn holdings(&self) -> &OwnerIndex {
        &self.holdings
    }

    /// Access control collaborator.
    pub fn access(&self) -> &A {
        &self.access
    }

    /// Mutable access control, for role management.
    pub fn access_mut(&mut self) -> &mut A {
        &mut self.access
    }
}
