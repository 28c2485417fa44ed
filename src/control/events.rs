//! Events generated during a frame
//!
//! Returned by `Simulation::frame` for the control surface's activity log.
//! Nothing here is retained by the engine.

use serde::{Deserialize, Serialize};

use crate::core::types::SimTime;
use crate::explorer::ExplorerEvent;
use crate::steering::Strategy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// A red agent's health reached zero
    RedNeutralized { agent: String, at: SimTime },
    /// The last red agent in a scope was neutralized
    TheaterSecured { scope: usize, name: String, at: SimTime },
    /// The explorer scored a strategy
    CoaEvaluated {
        strategy: Strategy,
        score: f64,
        /// Whether the record made the leaderboard
        ranked: bool,
        at: SimTime,
    },
    /// Periodic-switch mode replaced the active steering strategy
    StrategySwitched {
        from: Strategy,
        to: Strategy,
        at: SimTime,
    },
    /// Continuous exploration hit its evaluation cap and stopped the run
    ExplorationHalted { explored: u64, at: SimTime },
}

impl SimulationEvent {
    pub(crate) fn from_explorer(event: ExplorerEvent, at: SimTime) -> Self {
        match event {
            ExplorerEvent::StrategySwitched { from, to } => {
                SimulationEvent::StrategySwitched { from, to, at }
            }
            ExplorerEvent::Evaluated { record, ranked } => SimulationEvent::CoaEvaluated {
                strategy: record.strategy,
                score: record.score,
                ranked,
                at,
            },
            ExplorerEvent::Halted { explored } => {
                SimulationEvent::ExplorationHalted { explored, at }
            }
        }
    }
}
