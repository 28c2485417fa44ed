//! Theaters - independent arenas, each with its own roster

use serde::{Deserialize, Serialize};

use crate::world::agent::Agent;

const THEATER_NAMES: [&str; 8] = [
    "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel",
];

/// Display name for a theater index
pub fn theater_name(index: u32) -> String {
    match THEATER_NAMES.get(index as usize) {
        Some(name) => format!("Theater {}", name),
        None => format!("Theater {}", index + 1),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theater {
    pub index: u32,
    pub name: String,
    /// Uniform random in `[0, 1)` at creation; not read by the engine
    pub priority: f64,
    pub agents: Vec<Agent>,
}

impl Theater {
    pub fn new(index: u32, priority: f64, agents: Vec<Agent>) -> Self {
        Self {
            index,
            name: theater_name(index),
            priority,
            agents,
        }
    }

    pub fn active_blue_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_active_blue()).count()
    }

    pub fn living_red_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_living_red()).count()
    }

    /// No living red agents remain
    pub fn is_secured(&self) -> bool {
        self.living_red_count() == 0
    }
}
