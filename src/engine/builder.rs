//! Engine builder.
//!
//! Provides a fluent API for assembling the catalog an engine issues from.

use std::sync::Arc;

use crate::access::{AccessControl, RoleRegistry};
use crate::config::{default_editions, Config, ConfigError};
use crate::drops::{DropGate, PhaseSchedule};
use crate::edition::{EditionRegistry, EditionSeed, PromotionPolicy};
use crate::error::Result;
use crate::events::EventSink;
use crate::holdings::OwnerIndex;
use crate::rarity::WeightTable;

use super::IssuanceEngine;

/// Builder for an [`IssuanceEngine`].
///
/// # Example
///
/// ```
/// use wunderpass::access::RoleRegistry;
/// use wunderpass::edition::PromotionPolicy;
/// use wunderpass::engine::EngineBuilder;
///
/// let engine = EngineBuilder::new(RoleRegistry::new("owner"))
///     .with_promotion(PromotionPolicy::new(1, 10))
///     .build()
///     .unwrap();
/// assert_eq!(engine.current_id(), 0);
/// ```
pub struct EngineBuilder<A: AccessControl> {
    access: A,
    editions: Vec<EditionSeed>,
    promotion: PromotionPolicy,
    schedule: PhaseSchedule,
    wonders: WeightTable,
    patterns: WeightTable,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl<A: AccessControl> EngineBuilder<A> {
    /// Builder with the canonical catalog.
    pub fn new(access: A) -> Self {
        Self {
            access,
            editions: default_editions(),
            promotion: PromotionPolicy::default(),
            schedule: PhaseSchedule::default(),
            wonders: WeightTable::canonical_wonders(),
            patterns: WeightTable::canonical_patterns(),
            sinks: Vec::new(),
        }
    }

    /// Replace the edition forest.
    pub fn with_editions(mut self, editions: Vec<EditionSeed>) -> Self {
        self.editions = editions;
        self
    }

    pub fn with_promotion(mut self, promotion: PromotionPolicy) -> Self {
        self.promotion = promotion;
        self
    }

    pub fn with_schedule(mut self, schedule: PhaseSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_wonders(mut self, wonders: WeightTable) -> Self {
        self.wonders = wonders;
        self
    }

    pub fn with_patterns(mut self, patterns: WeightTable) -> Self {
        self.patterns = patterns;
        self
    }

    /// Register an event sink.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Build the engine. Fails if the edition forest does not register.
    pub fn build(self) -> Result<IssuanceEngine<A>> {
        let editions = EditionRegistry::from_seeds(&self.editions)?;
        Ok(IssuanceEngine {
            editions,
            promotion: self.promotion,
            gate: DropGate::new(self.schedule),
            wonders: self.wonders,
            patterns: self.patterns,
            holdings: OwnerIndex::new(),
            passes: Vec::new(),
            next_id: 0,
            access: self.access,
            sinks: self.sinks,
        })
    }
}

impl EngineBuilder<RoleRegistry> {
    /// Builder populated from configuration, with roles from `config.access`.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        let access = RoleRegistry::with_administrators(
            config.access.owner.as_str(),
            config.access.administrators.iter().map(String::as_str),
        );
        Ok(Self::new(access)
            .with_editions(config.editions.clone())
            .with_promotion(config.promotion)
            .with_schedule(config.drops.schedule()?)
            .with_wonders(config.wonder_table()?)
            .with_patterns(config.pattern_table()?))
    }
}
