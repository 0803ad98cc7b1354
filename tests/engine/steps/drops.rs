//! Drop phase step definitions.

use std::sync::Arc;

use cucumber::{given, then, when, World};
use wunderpass::drops::{DropState, PauseReason, PhaseSchedule};
use wunderpass::engine::IssuanceEngine;
use wunderpass::error::EngineError;
use wunderpass::events::MemorySink;
use wunderpass::pass::{OwnerId, PassRecord};

use super::{canonical_engine, operator, split_list};

/// Test context for drop phase scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct DropWorld {
    engine: IssuanceEngine,
    sink: Arc<MemorySink>,
    issued: Vec<PassRecord>,
    last_error: Option<EngineError>,
}

impl DropWorld {
    fn new() -> Self {
        let sink = Arc::new(MemorySink::new());
        let mut engine = canonical_engine();
        engine.subscribe(sink.clone());
        Self {
            engine,
            sink,
            issued: Vec::new(),
            last_error: None,
        }
    }

    fn issue(&mut self) {
        match self.engine.issue("Welt", 0, &OwnerId::from("collector")) {
            Ok(record) => {
                self.last_error = None;
                self.issued.push(record);
            }
            Err(e) => self.last_error = Some(e),
        }
    }
}

// ==========================================================================
// Setup
// ==========================================================================

#[given(expr = "phases of {int} passes labelled {string}")]
async fn given_uniform_phases(world: &mut DropWorld, size: u64, labels: String) {
    let schedule = PhaseSchedule::uniform(size, split_list(&labels)).expect("valid schedule");
    world
        .engine
        .set_phase_schedule(&operator(), schedule)
        .expect("operator may set the schedule");
}

// ==========================================================================
// Actions
// ==========================================================================

#[when(expr = "{int} passes are issued")]
async fn when_issued(world: &mut DropWorld, count: u64) {
    for _ in 0..count {
        world.issue();
    }
}

#[when(expr = "one more pass is requested")]
async fn when_one_more(world: &mut DropWorld) {
    world.issue();
}

#[when(expr = "the operator resumes minting")]
async fn when_resume(world: &mut DropWorld) {
    world.engine.force_resume(&operator()).unwrap();
}

#[when(expr = "the operator pauses minting")]
async fn when_pause(world: &mut DropWorld) {
    world.engine.force_pause(&operator()).unwrap();
}

#[when(expr = "{string} tries to resume minting")]
async fn when_stranger_resumes(world: &mut DropWorld, caller: String) {
    if let Err(e) = world.engine.force_resume(&OwnerId::from(caller)) {
        world.last_error = Some(e);
    }
}

// ==========================================================================
// Assertions
// ==========================================================================

#[then(expr = "minting is paused at the end of phase {int}")]
async fn then_paused_at_boundary(world: &mut DropWorld, phase: u32) {
    assert_eq!(
        world.engine.drop_state(),
        DropState::Paused {
            phase,
            reason: PauseReason::PhaseBoundary
        }
    );
}

#[then(expr = "minting is paused by the operator in phase {int}")]
async fn then_paused_by_operator(world: &mut DropWorld, phase: u32) {
    assert_eq!(
        world.engine.drop_state(),
        DropState::Paused {
            phase,
            reason: PauseReason::Operator
        }
    );
}

#[then(expr = "minting is open in phase {int}")]
async fn then_open(world: &mut DropWorld, phase: u32) {
    assert_eq!(world.engine.drop_state(), DropState::Open { phase });
}

#[then(expr = "every issued pass carries status {string}")]
async fn then_all_status(world: &mut DropWorld, status: String) {
    assert!(!world.issued.is_empty());
    for record in &world.issued {
        assert_eq!(record.status.label, status, "pass {}", record.id);
    }
}

#[then(expr = "the last pass carries status {string}")]
async fn then_last_status(world: &mut DropWorld, status: String) {
    let record = world.issued.last().expect("a pass was issued");
    assert_eq!(record.status.label, status);
}

#[then(expr = "the request is rejected because minting is paused")]
async fn then_rejected(world: &mut DropWorld) {
    assert_eq!(world.last_error, Some(EngineError::MintingPaused));
}

#[then(expr = "the request is rejected as unauthorized")]
async fn then_unauthorized(world: &mut DropWorld) {
    assert!(matches!(
        world.last_error,
        Some(EngineError::Unauthorized(_))
    ));
}

#[then(expr = "{int} passes have been issued")]
async fn then_issued_count(world: &mut DropWorld, count: u64) {
    assert_eq!(world.engine.issued(), count);
    assert_eq!(world.engine.current_id(), count);
    assert_eq!(world.issued.len() as u64, count);
}

#[then(expr = "a drop paused event was published")]
async fn then_pause_event(world: &mut DropWorld) {
    assert!(world
        .sink
        .events()
        .iter()
        .any(|event| event.name() == "drop_paused"));
}
