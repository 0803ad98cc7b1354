//! wunderpass-sim: batch issuance simulator
//!
//! Runs a configured number of issuances against a fresh engine and prints
//! the resulting distribution report as JSON on stdout.
//!
//! ## Configuration
//! - First argument: optional YAML config file
//! - WUNDERPASS_CONFIG: optional YAML config file
//! - WUNDERPASS__SIMULATION__ISSUANCES, WUNDERPASS__SIMULATION__SEED, ...:
//!   environment overrides
//! - WUNDERPASS_LOG: log filter (default "info"), logs go to stderr
//!
//! When a phase boundary closes minting and `simulation.auto_resume` is set,
//! the simulator reopens it as the configured owner and carries on.

use std::sync::Arc;

use tracing::{info, warn};

use wunderpass::config::Config;
use wunderpass::engine::EngineBuilder;
use wunderpass::error::EngineError;
use wunderpass::events::LogSink;
use wunderpass::pass::OwnerId;
use wunderpass::randomness::{RandomnessSource, SeededRandomness};
use wunderpass::report::DistributionReport;
use wunderpass::utils::bootstrap::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let path = std::env::args().nth(1);
    let config = Config::load(path.as_deref())?;
    let simulation = &config.simulation;

    let mut engine = EngineBuilder::from_config(&config)?
        .with_sink(Arc::new(LogSink))
        .build()?;

    let mut source: Box<dyn RandomnessSource> = match simulation.seed {
        Some(seed) => Box::new(SeededRandomness::from_seed(seed)),
        None => Box::new(SeededRandomness::from_entropy()),
    };

    let owners: Vec<OwnerId> = if simulation.owners.is_empty() {
        vec![OwnerId::from(config.access.owner.as_str())]
    } else {
        simulation.owners.iter().cloned().map(OwnerId::from).collect()
    };
    let operator = OwnerId::from(config.access.owner.as_str());

    info!(
        issuances = simulation.issuances,
        edition = %simulation.edition,
        owners = owners.len(),
        seeded = simulation.seed.is_some(),
        "Starting simulation"
    );

    let mut rejected = 0u64;
    for attempt in 0..simulation.issuances {
        let owner = &owners[(attempt % owners.len() as u64) as usize];
        match engine.issue_from(source.as_mut(), &simulation.edition, owner) {
            Ok(_) => {}
            Err(EngineError::MintingPaused) if simulation.auto_resume => {
                engine.force_resume(&operator)?;
                engine.issue_from(source.as_mut(), &simulation.edition, owner)?;
            }
            Err(EngineError::MintingPaused) => {
                rejected += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if rejected > 0 {
        warn!(rejected, "Issuances rejected while minting was paused");
    }
    info!(
        issued = engine.issued(),
        state = ?engine.drop_state(),
        "Simulation complete"
    );

    let report = DistributionReport::from_records(engine.passes());
    println!("{}", report.to_json_pretty()?);
    Ok(())
}
