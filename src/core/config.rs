//! Engine configuration with documented defaults
//!
//! Every tunable lives here. Defaults come from `core::constants`; a TOML
//! file may override any subset of fields.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::constants::*;
use crate::core::error::{Result, SimError};

/// How the damage pass resolves a blue agent in engagement range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageModel {
    /// Each blue agent rolls against comms reliability before dealing damage
    #[default]
    Probabilistic,
    /// Every blue agent in range deals damage, no roll
    Deterministic,
}

/// How the COA explorer samples and scores strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationMode {
    /// Switch the active strategy on a randomized timer and score the outgoing one
    #[default]
    PeriodicSwitch,
    /// Sample and score a random strategy every tick until the evaluation cap
    Continuous,
}

/// Configuration for the simulation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === ARENA ===
    /// Side of the square arena; positions are clamped to `[0, grid_size]`
    pub grid_size: f64,

    // === ENGAGEMENT ===
    /// Maximum blue-red separation at which a hit can land
    pub engagement_distance: f64,
    /// Damage of a single hit before the ROE multiplier
    pub hit_damage: f64,
    pub damage_model: DamageModel,

    // === METRICS ===
    pub base_success_probability: f64,

    // === STEERING ===
    /// Below this distance `hitrun` agents break off and retreat
    pub hitrun_retreat_distance: f64,

    // === EXPLORER ===
    pub exploration_mode: ExplorationMode,
    /// Lower bound of the randomized strategy switch window (seconds)
    pub strategy_switch_min: f64,
    /// Upper bound of the randomized strategy switch window (seconds)
    pub strategy_switch_max: f64,
    /// Number of COA records kept on the leaderboard
    pub leaderboard_capacity: usize,
    /// Continuous exploration halts after this many evaluations
    pub exploration_cap: u64,

    // === INITIALIZATION ===
    pub theater_count: u32,
    pub theater_blue_min: u32,
    pub theater_blue_max: u32,
    pub theater_red_min: u32,
    pub theater_red_max: u32,
    pub standard_blue_count: u32,
    pub standard_red_count: u32,

    // === CONTROL ===
    /// Upper bound for the speed multiplier input
    pub max_speed: f64,
    /// Tick theaters on the rayon pool
    pub parallel_theaters: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,

            engagement_distance: ENGAGEMENT_DISTANCE,
            hit_damage: HIT_DAMAGE,
            damage_model: DamageModel::Probabilistic,

            base_success_probability: BASE_SUCCESS_PROBABILITY,

            hitrun_retreat_distance: HITRUN_RETREAT_DISTANCE,

            exploration_mode: ExplorationMode::PeriodicSwitch,
            strategy_switch_min: STRATEGY_SWITCH_TIME_MIN,
            strategy_switch_max: STRATEGY_SWITCH_TIME_MAX,
            leaderboard_capacity: LEADERBOARD_CAPACITY,
            exploration_cap: EXPLORATION_CAP,

            theater_count: DEFAULT_THEATER_COUNT,
            theater_blue_min: THEATER_BLUE_MIN,
            theater_blue_max: THEATER_BLUE_MAX,
            theater_red_min: THEATER_RED_MIN,
            theater_red_max: THEATER_RED_MAX,
            standard_blue_count: STANDARD_BLUE_COUNT,
            standard_red_count: STANDARD_RED_COUNT,

            max_speed: MAX_SPEED_MULTIPLIER,
            parallel_theaters: false,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing fields take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }

        for (name, value) in [
            ("engagement_distance", self.engagement_distance),
            ("hit_damage", self.hit_damage),
            ("hitrun_retreat_distance", self.hitrun_retreat_distance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !(self.strategy_switch_min.is_finite()
            && self.strategy_switch_max.is_finite()
            && self.strategy_switch_min > 0.0
            && self.strategy_switch_min <= self.strategy_switch_max)
        {
            return Err(SimError::InvalidConfig(format!(
                "strategy switch window [{}, {}] must be positive and ordered",
                self.strategy_switch_min, self.strategy_switch_max
            )));
        }

        if self.leaderboard_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "leaderboard_capacity must be at least 1".into(),
            ));
        }

        if self.theater_count == 0 {
            return Err(SimError::InvalidConfig(
                "theater_count must be at least 1".into(),
            ));
        }

        if self.theater_blue_min > self.theater_blue_max
            || self.theater_red_min > self.theater_red_max
        {
            return Err(SimError::InvalidConfig(format!(
                "theater roster ranges are inverted: blue {}..={}, red {}..={}",
                self.theater_blue_min,
                self.theater_blue_max,
                self.theater_red_min,
                self.theater_red_max
            )));
        }

        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }

        if self.engagement_distance >= self.hitrun_retreat_distance {
            tracing::warn!(
                "hitrun_retreat_distance ({}) <= engagement_distance ({}): hit-and-run agents will never land hits",
                self.hitrun_retreat_distance,
                self.engagement_distance
            );
        }

        Ok(())
    }
}

/// Load an engine config from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    EngineConfig::from_toml_str(&contents)
}
