//! Owner aggregate step definitions.

use cucumber::{given, then, when, World};
use wunderpass::drops::PhaseSchedule;
use wunderpass::engine::IssuanceEngine;
use wunderpass::error::EngineError;
use wunderpass::pass::{OwnerId, PassId};

use super::{canonical_engine, operator, split_list};

/// Seed landing in the commonest wonder bucket of the canonical table.
const COMMON_SEED: u64 = 255;

/// Test context for owner aggregate scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct HoldingsWorld {
    engine: IssuanceEngine,
    last_error: Option<EngineError>,
}

impl HoldingsWorld {
    fn new() -> Self {
        Self {
            engine: canonical_engine(),
            last_error: None,
        }
    }
}

// ==========================================================================
// Setup
// ==========================================================================

#[given(expr = "phases of {int} passes labelled {string}")]
async fn given_uniform_phases(world: &mut HoldingsWorld, size: u64, labels: String) {
    let schedule = PhaseSchedule::uniform(size, split_list(&labels)).expect("valid schedule");
    world
        .engine
        .set_phase_schedule(&operator(), schedule)
        .expect("operator may set the schedule");
}

// ==========================================================================
// Actions
// ==========================================================================

#[when(expr = "{string} receives a pass with seed {int}")]
async fn when_receives_seeded(world: &mut HoldingsWorld, owner: String, seed: u64) {
    world
        .engine
        .issue("Berlin", seed, &OwnerId::from(owner))
        .expect("issuance succeeds");
}

#[when(expr = "{string} receives {int} passes")]
async fn when_receives_many(world: &mut HoldingsWorld, owner: String, count: u64) {
    let owner = OwnerId::from(owner);
    for _ in 0..count {
        world
            .engine
            .issue("Berlin", COMMON_SEED, &owner)
            .expect("issuance succeeds");
    }
}

#[when(expr = "the operator resumes minting")]
async fn when_resume(world: &mut HoldingsWorld) {
    world.engine.force_resume(&operator()).unwrap();
}

#[when(expr = "pass {int} moves from {string} to {string}")]
async fn when_transferred(world: &mut HoldingsWorld, id: PassId, from: String, to: String) {
    if let Err(e) = world
        .engine
        .on_transferred(&OwnerId::from(from), &OwnerId::from(to), id)
    {
        world.last_error = Some(e);
    }
}

// ==========================================================================
// Assertions
// ==========================================================================

#[then(expr = "{string} holds passes {string}")]
async fn then_holds(world: &mut HoldingsWorld, owner: String, ids: String) {
    let expected: Vec<PassId> = split_list(&ids)
        .iter()
        .map(|id| id.parse().expect("numeric id"))
        .collect();
    assert_eq!(world.engine.held_ids_of(&OwnerId::from(owner)), expected);
}

#[then(expr = "{string} holds nothing")]
async fn then_holds_nothing(world: &mut HoldingsWorld, owner: String) {
    let owner = OwnerId::from(owner);
    assert!(world.engine.held_ids_of(&owner).is_empty());
    assert!(world.engine.best_status_of(&owner).is_none());
    assert!(world.engine.best_wonder_of(&owner).is_none());
}

#[then(expr = "the best wonder of {string} is {string}")]
async fn then_best_wonder(world: &mut HoldingsWorld, owner: String, wonder: String) {
    let best = world
        .engine
        .best_wonder_of(&OwnerId::from(owner))
        .expect("owner holds a pass");
    assert_eq!(best.label, wonder);
}

#[then(expr = "the best status of {string} is {string}")]
async fn then_best_status(world: &mut HoldingsWorld, owner: String, status: String) {
    let best = world
        .engine
        .best_status_of(&OwnerId::from(owner))
        .expect("owner holds a pass");
    assert_eq!(best.label, status);
}

#[then(expr = "the move is rejected because {string} does not hold it")]
async fn then_not_owner(world: &mut HoldingsWorld, owner: String) {
    match &world.last_error {
        Some(EngineError::NotOwner { owner: rejected, .. }) => assert_eq!(rejected, &owner),
        other => panic!("expected NotOwner, got {other:?}"),
    }
}

#[then(expr = "the move is rejected because the pass does not exist")]
async fn then_unknown_pass(world: &mut HoldingsWorld) {
    assert!(matches!(
        world.last_error,
        Some(EngineError::UnknownPass(_))
    ));
}
