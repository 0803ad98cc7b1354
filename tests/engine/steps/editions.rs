//! Edition promotion step definitions.

use cucumber::{given, then, when, World};
use wunderpass::engine::IssuanceEngine;
use wunderpass::error::EngineError;
use wunderpass::pass::{OwnerId, PassRecord};

use super::{canonical_engine, operator};

/// Test context for edition scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct EditionWorld {
    engine: IssuanceEngine,
    issued: Vec<PassRecord>,
    last_error: Option<EngineError>,
}

impl EditionWorld {
    fn new() -> Self {
        Self {
            engine: canonical_engine(),
            issued: Vec::new(),
            last_error: None,
        }
    }

    fn request(&mut self, edition: &str) {
        match self.engine.issue(edition, 0, &OwnerId::from("collector")) {
            Ok(record) => self.issued.push(record),
            Err(e) => self.last_error = Some(e),
        }
    }
}

// ==========================================================================
// Setup
// ==========================================================================

#[given(expr = "the promotion threshold is {int}")]
async fn given_threshold(world: &mut EditionWorld, threshold: u64) {
    world
        .engine
        .set_promotion_threshold(&operator(), threshold)
        .expect("operator may set the threshold");
}

// ==========================================================================
// Issuance
// ==========================================================================

#[when(expr = "{int} passes are requested under {string}")]
async fn when_many_requested(world: &mut EditionWorld, count: u64, edition: String) {
    for _ in 0..count {
        world.request(&edition);
    }
}

#[when(expr = "a pass is requested under {string}")]
async fn when_one_requested(world: &mut EditionWorld, edition: String) {
    world.request(&edition);
}

#[when(expr = "editions {string} are registered under parents {string}")]
async fn when_registered(world: &mut EditionWorld, names: String, parents: String) {
    let names = super::split_list(&names);
    let parents: Vec<Option<String>> = super::split_list(&parents)
        .into_iter()
        .map(|parent| (parent != "-").then_some(parent))
        .collect();
    if let Err(e) = world.engine.register_editions(&operator(), &names, &parents) {
        world.last_error = Some(e);
    }
}

// ==========================================================================
// Assertions
// ==========================================================================

#[then(expr = "passes {int} to {int} are credited to {string}")]
async fn then_range_credited(world: &mut EditionWorld, first: usize, last: usize, edition: String) {
    for record in &world.issued[first..=last] {
        assert_eq!(record.edition, edition, "pass {}", record.id);
    }
}

#[then(expr = "the last pass is credited to {string}")]
async fn then_last_credited(world: &mut EditionWorld, edition: String) {
    let record = world.issued.last().expect("a pass was issued");
    assert_eq!(record.edition, edition);
}

#[then(expr = "edition {string} has been credited {int} passes")]
async fn then_counter(world: &mut EditionWorld, edition: String, count: u64) {
    assert_eq!(world.engine.counter_of(&edition).unwrap(), count);
}

#[then(expr = "the request fails with an unknown edition error")]
async fn then_unknown_edition(world: &mut EditionWorld) {
    assert!(matches!(
        world.last_error,
        Some(EngineError::UnknownEdition(_))
    ));
}

#[then(expr = "registration fails with an invalid edition error")]
async fn then_invalid_edition(world: &mut EditionWorld) {
    assert!(matches!(
        world.last_error,
        Some(EngineError::InvalidEdition(_))
    ));
}

#[then(expr = "no pass has been issued")]
async fn then_nothing_issued(world: &mut EditionWorld) {
    assert!(world.issued.is_empty());
    assert_eq!(world.engine.current_id(), 0);
}
