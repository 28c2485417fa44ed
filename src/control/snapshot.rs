//! Read-only snapshot of engine outputs for the control surface

use serde::{Deserialize, Serialize};

use crate::core::config::ExplorationMode;
use crate::core::error::Result;
use crate::core::types::SimTime;
use crate::explorer::CoaRecord;
use crate::metrics::MissionMetrics;
use crate::steering::Strategy;
use crate::world::state::{SimMode, TheaterSummary, WorldState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub mode: SimMode,
    pub elapsed: SimTime,
    pub ticks: u64,
    pub running: bool,
    pub exploring: bool,
    pub exploration_mode: ExplorationMode,
    pub exploration_halted: bool,
    /// Strategy currently steering blue agents
    pub current_strategy: Strategy,
    /// Strategy most recently scored by the explorer
    pub last_evaluated: Option<Strategy>,
    pub explored: u64,
    pub leaderboard: Vec<CoaRecord>,
    pub metrics: MissionMetrics,
    pub theaters: Vec<TheaterSummary>,
    pub world: WorldState,
}

impl SimulationSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let best = self
            .leaderboard
            .first()
            .map(|r| format!("{} ({:.0})", r.strategy, r.score))
            .unwrap_or_else(|| "none".to_string());
        let secured = self.theaters.iter().filter(|t| t.secured).count();
        format!(
            "{} mode, {:.1}s over {} ticks\nStrategy: {}, explored {} COAs, best {}\nSuccess {:.1}%, casualties {}, time to objective {}s\n{}/{} theaters secured",
            self.mode,
            self.elapsed,
            self.ticks,
            self.current_strategy,
            self.explored,
            best,
            self.metrics.success_probability,
            self.metrics.predicted_casualties,
            self.metrics.time_to_objective,
            secured,
            self.theaters.len(),
        )
    }
}
