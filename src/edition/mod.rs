//! Edition registry with hierarchical promotion.
//!
//! Editions form a forest (city → country → continent → world). Each edition
//! counts the passes credited to it. When a narrow edition is saturated, an
//! issuance overflows into its parent, so the most specific editions stay the
//! scarcest and the roots absorb unlimited issuance.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{EngineError, Result};

/// Default per-edition promotion threshold.
pub const DEFAULT_PROMOTION_THRESHOLD: u64 = 10;
/// Default cap multiplier applied per promotion step.
pub const DEFAULT_PROMOTION_GROWTH: u64 = 10;

/// Index of an edition in the registry arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditionId(usize);

#[derive(Debug, Clone)]
struct EditionNode {
    name: String,
    parent: Option<EditionId>,
    issued: u64,
}

/// One `(name, parent)` registration entry, as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditionSeed {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

impl EditionSeed {
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::to_string),
        }
    }
}

/// Caps used while walking up the parent chain.
///
/// The requested edition is rung 0 and may hold `threshold` passes; each step
/// towards the root multiplies the cap by `growth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PromotionPolicy {
    pub threshold: u64,
    pub growth: u64,
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PROMOTION_THRESHOLD,
            growth: DEFAULT_PROMOTION_GROWTH,
        }
    }
}

impl PromotionPolicy {
    pub fn new(threshold: u64, growth: u64) -> Self {
        Self { threshold, growth }
    }

    /// Cap for the edition `rung` steps above the requested one.
    pub fn cap(&self, rung: u32) -> u64 {
        self.growth
            .checked_pow(rung)
            .and_then(|factor| self.threshold.checked_mul(factor))
            .unwrap_or(u64::MAX)
    }
}

/// Arena of editions, addressed by name.
#[derive(Debug, Clone, Default)]
pub struct EditionRegistry {
    nodes: Vec<EditionNode>,
    by_name: HashMap<String, EditionId>,
}

impl EditionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configured seeds.
    pub fn from_seeds(seeds: &[EditionSeed]) -> Result<Self> {
        let mut registry = Self::new();
        registry.register_seeds(seeds)?;
        Ok(registry)
    }

    /// Register editions in bulk.
    ///
    /// Each parent must already be registered or appear earlier in the same
    /// batch. Existing names are left untouched, counters included. The
    /// whole batch is validated before anything is inserted.
    pub fn register(&mut self, names: &[String], parents: &[Option<String>]) -> Result<usize> {
        if names.len() != parents.len() {
            return Err(EngineError::InvalidEdition(format!(
                "{} names but {} parents",
                names.len(),
                parents.len()
            )));
        }

        let seeds: Vec<EditionSeed> = names
            .iter()
            .zip(parents)
            .map(|(name, parent)| EditionSeed {
                name: name.clone(),
                parent: parent.clone(),
            })
            .collect();
        self.register_seeds(&seeds)
    }

    /// Register `(name, parent)` pairs. Returns the number of new editions.
    pub fn register_seeds(&mut self, seeds: &[EditionSeed]) -> Result<usize> {
        self.validate_batch(seeds)?;

        let mut added = 0;
        for seed in seeds {
            if self.by_name.contains_key(&seed.name) {
                continue;
            }
            // Validated above: every parent resolves by now.
            let parent = seed
                .parent
                .as_ref()
                .and_then(|parent| self.by_name.get(parent).copied());
            let id = EditionId(self.nodes.len());
            self.nodes.push(EditionNode {
                name: seed.name.clone(),
                parent,
                issued: 0,
            });
            self.by_name.insert(seed.name.clone(), id);
            added += 1;
        }

        info!(added, total = self.nodes.len(), "Editions registered");
        Ok(added)
    }

    fn validate_batch(&self, seeds: &[EditionSeed]) -> Result<()> {
        for (position, seed) in seeds.iter().enumerate() {
            if seed.name.is_empty() {
                return Err(EngineError::InvalidEdition(format!(
                    "empty edition name at position {position}"
                )));
            }
            if self.by_name.contains_key(&seed.name) {
                continue;
            }
            let Some(parent) = &seed.parent else {
                continue;
            };
            if parent == &seed.name {
                return Err(EngineError::InvalidEdition(format!(
                    "edition '{}' cannot be its own parent",
                    seed.name
                )));
            }
            let declared_earlier = seeds[..position].iter().any(|s| &s.name == parent);
            if !self.by_name.contains_key(parent) && !declared_earlier {
                return Err(EngineError::InvalidEdition(format!(
                    "parent '{}' of '{}' is not registered",
                    parent, seed.name
                )));
            }
        }
        Ok(())
    }

    fn id_of(&self, name: &str) -> Result<EditionId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::UnknownEdition(name.to_string()))
    }

    /// Edition to credit for one new issuance requested under `requested`.
    ///
    /// Walks the parent chain and stops at the first edition that stays within
    /// its rung's cap after one more pass. A saturated root is credited
    /// anyway. Does not mutate the registry.
    pub fn resolve_for_issuance(&self, requested: &str, policy: &PromotionPolicy) -> Result<&str> {
        let mut id = self.id_of(requested)?;
        let mut rung = 0u32;

        loop {
            let node = &self.nodes[id.0];
            if node.issued.saturating_add(1) <= policy.cap(rung) {
                break;
            }
            match node.parent {
                Some(parent) => {
                    debug!(
                        from = %node.name,
                        to = %self.nodes[parent.0].name,
                        issued = node.issued,
                        cap = policy.cap(rung),
                        "Edition saturated, promoting"
                    );
                    id = parent;
                    rung += 1;
                }
                None => break,
            }
        }

        Ok(&self.nodes[id.0].name)
    }

    /// Credit one issuance to `name`.
    pub fn credit(&mut self, name: &str) -> Result<u64> {
        let id = self.id_of(name)?;
        let node = &mut self.nodes[id.0];
        node.issued += 1;
        Ok(node.issued)
    }

    /// Passes credited to `name` so far.
    pub fn counter_of(&self, name: &str) -> Result<u64> {
        let id = self.id_of(name)?;
        Ok(self.nodes[id.0].issued)
    }

    pub fn parent_of(&self, name: &str) -> Result<Option<&str>> {
        let id = self.id_of(name)?;
        Ok(self.nodes[id.0]
            .parent
            .map(|parent| self.nodes[parent.0].name.as_str()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// True if `name` has no parent.
    pub fn is_root(&self, name: &str) -> Result<bool> {
        Ok(self.parent_of(name)?.is_none())
    }

    /// Edition names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
