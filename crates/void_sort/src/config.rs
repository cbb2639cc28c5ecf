//! Sort configuration
//!
//! Built once at startup and handed to the rule registry and the sort handler.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `VOID_SORT_BOGO_CHANCE`, `VOID_SORT_RANDOMIZE_CHANCE`
//! 2. Config file passed to [`SortConfig::load_from_file`]
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! item_rules = ["mod", "id", "meta", "nbt_has", "nbt_rules"]
//! nbt_rules = ["enchantment", "stored_enchantment", "potion", "durability"]
//! bogo_chance = 0.005
//! randomize_chance = 0.3
//! ```

use crate::error::{SortError, SortResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`SortConfig::bogo_chance`]
pub const ENV_BOGO_CHANCE: &str = "VOID_SORT_BOGO_CHANCE";

/// Environment variable overriding [`SortConfig::randomize_chance`]
pub const ENV_RANDOMIZE_CHANCE: &str = "VOID_SORT_RANDOMIZE_CHANCE";

/// Item rules applied when the config names none
pub const DEFAULT_ITEM_RULES: &[&str] = &["mod", "id", "meta", "nbt_has", "nbt_rules"];

/// Metadata rules applied when the config names none
pub const DEFAULT_NBT_RULES: &[&str] = &["enchantment", "stored_enchantment", "potion", "durability"];

/// Sorting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Item rule names, highest priority first
    pub item_rules: Vec<String>,
    /// Metadata rule names, highest priority first
    pub nbt_rules: Vec<String>,
    /// Probability that a sort shuffles instead of ordering
    pub bogo_chance: f32,
    /// Per-slot probability used by item randomization
    pub randomize_chance: f32,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            item_rules: DEFAULT_ITEM_RULES.iter().map(|s| s.to_string()).collect(),
            nbt_rules: DEFAULT_NBT_RULES.iter().map(|s| s.to_string()).collect(),
            bogo_chance: 0.005,
            randomize_chance: 0.3,
        }
    }
}

impl SortConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> SortResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env()?;
        log::info!("Loaded sort config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> SortResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> SortResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> SortResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> SortResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BOGO_CHANCE) {
            self.bogo_chance = parse_chance(ENV_BOGO_CHANCE, &value)?;
        }
        if let Some(value) = lookup(ENV_RANDOMIZE_CHANCE) {
            self.randomize_chance = parse_chance(ENV_RANDOMIZE_CHANCE, &value)?;
        }
        self.validate()
    }

    /// Check value ranges
    pub fn validate(&self) -> SortResult<()> {
        check_chance("bogo_chance", self.bogo_chance)?;
        check_chance("randomize_chance", self.randomize_chance)?;
        Ok(())
    }
}

fn parse_chance(key: &str, value: &str) -> SortResult<f32> {
    value
        .trim()
        .parse::<f32>()
        .map_err(|_| SortError::InvalidConfig(format!("{} is not a number: {}", key, value)))
}

fn check_chance(key: &str, value: f32) -> SortResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SortError::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            key, value
        )))
    }
}
