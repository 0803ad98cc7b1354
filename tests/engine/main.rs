//! Acceptance tests for the issuance engine using Cucumber.
//!
//! ```bash
//! cargo test --test engine
//! ```

mod steps;

use cucumber::writer::Stats as _;
use cucumber::World;
use steps::drops::DropWorld;
use steps::editions::EditionWorld;
use steps::holdings::HoldingsWorld;

#[tokio::main]
async fn main() {
    let mut failed = Vec::new();

    println!("\n=== Running Edition Promotion Tests ===\n");
    if EditionWorld::cucumber()
        .fail_on_skipped()
        .run("tests/engine/features/editions.feature")
        .await
        .execution_has_failed()
    {
        failed.push("editions");
    }

    println!("\n=== Running Drop Phase Tests ===\n");
    if DropWorld::cucumber()
        .fail_on_skipped()
        .run("tests/engine/features/drop_phases.feature")
        .await
        .execution_has_failed()
    {
        failed.push("drop_phases");
    }

    println!("\n=== Running Owner Aggregate Tests ===\n");
    if HoldingsWorld::cucumber()
        .fail_on_skipped()
        .run("tests/engine/features/owner_aggregates.feature")
        .await
        .execution_has_failed()
    {
        failed.push("owner_aggregates");
    }

    // Every suite runs; the process fails if any of them did.
    assert!(failed.is_empty(), "failing feature suites: {failed:?}");
}
