//! WunderPass - rarity & distribution engine
//!
//! Decides, for every newly issued pass, which edition it is credited to,
//! which status tier it carries, and which wonder and pattern it receives.
//! Tracks drop phases that pause minting at fixed boundaries and keeps
//! per-owner aggregates of the rarest attributes held.

pub mod access;
pub mod config;
pub mod drops;
pub mod edition;
pub mod engine;
pub mod error;
pub mod events;
pub mod holdings;
pub mod pass;
pub mod randomness;
pub mod rarity;
pub mod report;
pub mod utils;

pub use access::{AccessControl, RoleRegistry};
pub use config::{Config, ConfigError};
pub use drops::{DropState, PauseReason, PhaseSchedule};
pub use edition::{EditionRegistry, EditionSeed, PromotionPolicy};
pub use engine::{EngineBuilder, IssuanceEngine};
pub use error::{EngineError, Result};
pub use events::{EventSink, LogSink, MemorySink, PassEvent};
pub use pass::{OwnerId, PassId, PassRecord};
pub use randomness::{RandomnessSource, SeededRandomness, SequenceRandomness};
pub use rarity::{Rank, RankedLabel, WeightTable};
pub use report::DistributionReport;
