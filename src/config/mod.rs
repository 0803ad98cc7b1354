//! Application configuration.
//!
//! Aggregates the catalog (editions, weight tables, drop phases, roles) and
//! simulator settings into a single Config struct that can be loaded from
//! YAML files or environment variables.

mod catalog;
mod simulation;

pub use catalog::{default_editions, AccessConfig, DropConfig, DEFAULT_OWNER};
pub use simulation::{SimulationConfig, DEFAULT_SIMULATED_ISSUANCES};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "WUNDERPASS_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "WUNDERPASS";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "WUNDERPASS_LOG";

use serde::Deserialize;

use crate::edition::{EditionRegistry, EditionSeed, PromotionPolicy};
use crate::error::EngineError;
use crate::rarity::weights::{CANONICAL_PATTERNS, CANONICAL_WONDERS};
use crate::rarity::{WeightEntry, WeightTable};

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Edition forest, parents before children.
    pub editions: Vec<EditionSeed>,
    /// Promotion caps.
    pub promotion: PromotionPolicy,
    /// Drop phases and status labels.
    pub drops: DropConfig,
    /// Wonder ladder, rarest first.
    pub wonders: Vec<WeightEntry>,
    /// Pattern ladder, rarest first.
    pub patterns: Vec<WeightEntry>,
    /// Owner and administrators.
    pub access: AccessConfig,
    /// Batch simulator settings.
    pub simulation: SimulationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editions: default_editions(),
            promotion: PromotionPolicy::default(),
            drops: DropConfig::default(),
            wonders: WeightEntry::from_pairs(&CANONICAL_WONDERS),
            patterns: WeightEntry::from_pairs(&CANONICAL_PATTERNS),
            access: AccessConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `config.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config: Config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document. Missing sections take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the catalog builds: editions register, tables have weight,
    /// the phase schedule is well formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        EditionRegistry::from_seeds(&self.editions)?;
        self.wonder_table()?;
        self.pattern_table()?;
        self.drops.schedule()?;
        Ok(())
    }

    pub fn wonder_table(&self) -> Result<WeightTable, EngineError> {
        WeightTable::from_weights("wonder", &self.wonders)
    }

    pub fn pattern_table(&self) -> Result<WeightTable, EngineError> {
        WeightTable::from_weights("pattern", &self.patterns)
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        Self::default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] EngineError),
}
