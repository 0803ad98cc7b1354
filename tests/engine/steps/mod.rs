//! Cucumber step definitions for engine acceptance tests.

pub mod drops;
pub mod editions;
pub mod holdings;

use wunderpass::access::RoleRegistry;
use wunderpass::engine::IssuanceEngine;
use wunderpass::pass::OwnerId;

/// Identity holding the owner role in every scenario.
pub const OPERATOR: &str = "owner";

/// Engine over the canonical catalog, administered by [`OPERATOR`].
pub fn canonical_engine() -> IssuanceEngine {
    IssuanceEngine::builder(RoleRegistry::new(OPERATOR))
        .build()
        .expect("canonical catalog builds")
}

pub fn operator() -> OwnerId {
    OwnerId::from(OPERATOR)
}

/// Split a comma separated list, trimming whitespace.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
