//! World state - the agent population in one of two layouts
//!
//! Standard mode keeps a single flat roster. Multi-theater mode keeps N
//! independent theaters. Each roster is a "scope": targeting and damage
//! never cross scope boundaries.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::EngineConfig;
use crate::core::constants::MAX_HEALTH;
use crate::core::types::Vec2;
use crate::world::agent::Agent;
use crate::world::theater::Theater;

/// Blue deploys in the western strip of the arena
const BLUE_DEPLOY_MAX_X: f64 = 0.3;
/// Red deploys in the eastern strip of the arena
const RED_DEPLOY_MIN_X: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimMode {
    #[default]
    MultiTheater,
    Standard,
}

impl SimMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multi-theater" | "multi" | "theater" => Some(SimMode::MultiTheater),
            "standard" => Some(SimMode::Standard),
            _ => None,
        }
    }
}

impl fmt::Display for SimMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimMode::MultiTheater => f.write_str("multi-theater"),
            SimMode::Standard => f.write_str("standard"),
        }
    }
}

/// Per-scope status for the control surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheaterSummary {
    pub name: String,
    pub active_blue: usize,
    pub living_red: usize,
    pub red_health_total: u32,
    pub secured: bool,
}

impl TheaterSummary {
    fn from_roster(name: &str, agents: &[Agent]) -> Self {
        let active_blue = agents.iter().filter(|a| a.is_active_blue()).count();
        let living_red = agents.iter().filter(|a| a.is_living_red()).count();
        let red_health_total = agents.iter().filter_map(|a| a.health()).sum();
        Self {
            name: name.to_string(),
            active_blue,
            living_red,
            red_health_total,
            secured: living_red == 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum WorldState {
    Standard { agents: Vec<Agent> },
    MultiTheater { theaters: Vec<Theater> },
}

impl WorldState {
    /// Build a fresh world for `mode` with random rosters and deployments
    pub fn generate<R: Rng + ?Sized>(mode: SimMode, config: &EngineConfig, rng: &mut R) -> Self {
        let world = match mode {
            SimMode::Standard => WorldState::Standard {
                agents: spawn_roster(
                    0,
                    config.standard_blue_count,
                    config.standard_red_count,
                    config.grid_size,
                    rng,
                ),
            },
            SimMode::MultiTheater => {
                let theaters = (0..config.theater_count)
                    .map(|index| {
                        let blue = rng.gen_range(config.theater_blue_min..=config.theater_blue_max);
                        let red = rng.gen_range(config.theater_red_min..=config.theater_red_max);
                        let priority = rng.gen::<f64>();
                        let agents = spawn_roster(index, blue, red, config.grid_size, rng);
                        Theater::new(index, priority, agents)
                    })
                    .collect();
                WorldState::MultiTheater { theaters }
            }
        };

        tracing::info!(
            "World initialized: mode={}, scopes={}, blue={}, red={}",
            world.mode(),
            world.scope_count(),
            world.active_blue_count(),
            world.living_red_count()
        );

        world
    }

    /// World holding exactly the given flat roster
    pub fn standard(agents: Vec<Agent>) -> Self {
        WorldState::Standard { agents }
    }

    pub fn multi_theater(theaters: Vec<Theater>) -> Self {
        WorldState::MultiTheater { theaters }
    }

    pub fn mode(&self) -> SimMode {
        match self {
            WorldState::Standard { .. } => SimMode::Standard,
            WorldState::MultiTheater { .. } => SimMode::MultiTheater,
        }
    }

    pub fn scope_count(&self) -> usize {
        match self {
            WorldState::Standard { .. } => 1,
            WorldState::MultiTheater { theaters } => theaters.len(),
        }
    }

    /// Rosters that are simulated independently
    pub fn scopes(&self) -> Vec<&[Agent]> {
        match self {
            WorldState::Standard { agents } => vec![agents.as_slice()],
            WorldState::MultiTheater { theaters } => {
                theaters.iter().map(|t| t.agents.as_slice()).collect()
            }
        }
    }

    pub(crate) fn scopes_mut(&mut self) -> Vec<&mut Vec<Agent>> {
        match self {
            WorldState::Standard { agents } => vec![agents],
            WorldState::MultiTheater { theaters } => {
                theaters.iter_mut().map(|t| &mut t.agents).collect()
            }
        }
    }

    /// Every agent, flattened across theaters
    pub fn agents(&self) -> Box<dyn Iterator<Item = &Agent> + '_> {
        match self {
            WorldState::Standard { agents } => Box::new(agents.iter()),
            WorldState::MultiTheater { theaters } => {
                Box::new(theaters.iter().flat_map(|t| t.agents.iter()))
            }
        }
    }

    pub fn theaters(&self) -> &[Theater] {
        match self {
            WorldState::Standard { .. } => &[],
            WorldState::MultiTheater { theaters } => theaters,
        }
    }

    pub fn active_blue_count(&self) -> usize {
        self.agents().filter(|a| a.is_active_blue()).count()
    }

    pub fn living_red_count(&self) -> usize {
        self.agents().filter(|a| a.is_living_red()).count()
    }

    pub fn summaries(&self) -> Vec<TheaterSummary> {
        match self {
            WorldState::Standard { agents } => {
                vec![TheaterSummary::from_roster("Standard", agents)]
            }
            WorldState::MultiTheater { theaters } => theaters
                .iter()
                .map(|t| TheaterSummary::from_roster(&t.name, &t.agents))
                .collect(),
        }
    }
}

fn spawn_roster<R: Rng + ?Sized>(
    theater: u32,
    blue_count: u32,
    red_count: u32,
    grid_size: f64,
    rng: &mut R,
) -> Vec<Agent> {
    let mut agents = Vec::with_capacity((blue_count + red_count) as usize);

    for number in 0..blue_count {
        let position = Vec2::new(
            rng.gen_range(0.0..=grid_size * BLUE_DEPLOY_MAX_X),
            rng.gen_range(0.0..=grid_size),
        );
        agents.push(Agent::blue(theater, number, position));
    }

    for number in 0..red_count {
        let position = Vec2::new(
            rng.gen_range(grid_size * RED_DEPLOY_MIN_X..=grid_size),
            rng.gen_range(0.0..=grid_size),
        );
        agents.push(Agent::red(theater, number, position, MAX_HEALTH));
    }

    agents
}
