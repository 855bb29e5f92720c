//! # Configuration
//!
//! Game tuning and logging settings, read from a TOML file.
//!
//! ```rust,no_run
//! use labyrinth::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     Config::create_default("config.toml")?;
//!     let config = Config::load("config.toml")?;
//!     println!("Starting vitality: {}", config.game.starting_vitality);
//!     Ok(())
//! }
//! ```
//!
//! ## File format
//!
//! ```toml
//! [game]
//! # seed = 42            # omit for a fresh labyrinth every run
//! starting_vitality = 10
//! carry_capacity = 15
//! npc_count = 5
//! exhaustion_interval = 5
//! boots_exhaustion_interval = 8
//!
//! [logging]
//! level = "warn"
//! # file = "labyrinth.log"
//! ```
//!
//! Precedence: CLI args > config file > defaults.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::labyrinth::types::{
    BOOTS_EXHAUSTION_INTERVAL, CARRY_CAPACITY, EXHAUSTION_INTERVAL, STARTING_VITALITY,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed RNG seed. When unset a random seed is drawn per session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_starting_vitality")]
    pub starting_vitality: i32,
    #[serde(default = "default_carry_capacity")]
    pub carry_capacity: u32,
    /// Number of wandering monsters, fairies and wizards.
    #[serde(default = "default_npc_count")]
    pub npc_count: usize,
    /// Steps between exhaustion ticks.
    #[serde(default = "default_exhaustion_interval")]
    pub exhaustion_interval: u32,
    /// Steps between exhaustion ticks once Hermes's Boots are worn.
    #[serde(default = "default_boots_exhaustion_interval")]
    pub boots_exhaustion_interval: u32,
}

fn default_starting_vitality() -> i32 {
    STARTING_VITALITY
}

fn default_carry_capacity() -> u32 {
    CARRY_CAPACITY
}

fn default_npc_count() -> usize {
    5
}

fn default_exhaustion_interval() -> u32 {
    EXHAUSTION_INTERVAL
}

fn default_boots_exhaustion_interval() -> u32 {
    BOOTS_EXHAUSTION_INTERVAL
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seed: None,
            starting_vitality: default_starting_vitality(),
            carry_capacity: default_carry_capacity(),
            npc_count: default_npc_count(),
            exhaustion_interval: default_exhaustion_interval(),
            boots_exhaustion_interval: default_boots_exhaustion_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append log lines here instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let g = &self.game;
        if g.starting_vitality <= 0 {
            return Err(anyhow!("game.starting_vitality must be positive"));
        }
        if g.exhaustion_interval == 0 || g.boots_exhaustion_interval == 0 {
            return Err(anyhow!("exhaustion intervals must be at least 1"));
        }
        Ok(())
    }

    /// Map the configured level name onto a log filter; unknown names fall back to warn.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Warn,
        }
    }
}
