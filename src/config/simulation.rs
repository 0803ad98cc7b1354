//! Settings for the `wunderpass-sim` batch runner.

use serde::Deserialize;

/// Default number of passes the simulator issues.
pub const DEFAULT_SIMULATED_ISSUANCES: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of issuance attempts.
    pub issuances: u64,
    /// PRNG seed. None draws from OS entropy.
    pub seed: Option<u64>,
    /// Edition requested for every issuance.
    pub edition: String,
    /// Recipients, served round-robin.
    pub owners: Vec<String>,
    /// Reopen minting as the owner whenever a phase closes.
    pub auto_resume: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            issuances: DEFAULT_SIMULATED_ISSUANCES,
            seed: None,
            edition: "Berlin".to_string(),
            owners: vec!["user1".to_string(), "user2".to_string()],
            auto_resume: true,
        }
    }
}
