//! Control loop - per-frame orchestration of the engine
//!
//! Each frame runs to completion in this order:
//! tick engine -> metrics -> explorer
//!
//! The caller owns scheduling (fixed-rate timer or once per rendered frame)
//! and must not overlap frames. A paused simulation ignores frames, so the
//! world is always a whole number of ticks.

pub mod events;
pub mod snapshot;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{EngineConfig, ExplorationMode};
use crate::core::error::Result;
use crate::core::types::SimTime;
use crate::engine::{run_tick, TickContext};
use crate::explorer::{CoaExplorer, ExplorerContext, ExplorerEvent, Leaderboard};
use crate::metrics::{compute_metrics, MissionMetrics};
use crate::policy::{Logistics, Policy};
use crate::steering::Strategy;
use crate::world::state::{SimMode, WorldState};

pub use events::SimulationEvent;
pub use snapshot::SimulationSnapshot;

/// Operator inputs read every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlInputs {
    pub mode: SimMode,
    pub policy: Policy,
    pub logistics: Logistics,
    /// Multiplier from real seconds to simulation seconds
    pub speed: f64,
    /// Operator-selected steering strategy
    pub strategy: Strategy,
    /// Whether the COA explorer runs
    pub exploring: bool,
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            mode: SimMode::MultiTheater,
            policy: Policy::default(),
            logistics: Logistics::default(),
            speed: 1.0,
            strategy: Strategy::Direct,
            exploring: true,
        }
    }
}

pub struct Simulation {
    config: EngineConfig,
    inputs: ControlInputs,
    world: WorldState,
    explorer: CoaExplorer,
    metrics: MissionMetrics,
    elapsed: SimTime,
    ticks: u64,
    running: bool,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Build a running simulation with default inputs
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self> {
        Self::with_inputs(config, ControlInputs::default(), seed)
    }

    pub fn with_inputs(config: EngineConfig, inputs: ControlInputs, seed: u64) -> Result<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let inputs = ControlInputs {
            policy: inputs.policy.clamped(),
            logistics: inputs.logistics.clamped(),
            speed: clamp_speed(inputs.speed, config.max_speed),
            ..inputs
        };
        let world = WorldState::generate(inputs.mode, &config, &mut rng);
        let mut explorer = CoaExplorer::new(&config, &mut rng);
        explorer.set_active_strategy(inputs.strategy);
        let metrics = compute_metrics(
            &world,
            &inputs.policy,
            &inputs.logistics,
            config.base_success_probability,
        );

        Ok(Self {
            config,
            inputs,
            world,
            explorer,
            metrics,
            elapsed: 0.0,
            ticks: 0,
            running: true,
            rng,
        })
    }

    /// Advance one tick covering `real_dt` seconds of wall time
    pub fn frame(&mut self, real_dt: f64) -> Vec<SimulationEvent> {
        if !self.running {
            return Vec::new();
        }

        let real_dt = if real_dt.is_finite() { real_dt.max(0.0) } else { 0.0 };
        let dt = real_dt * self.inputs.speed;
        self.elapsed += dt;
        let at = self.elapsed;
        let mut events = Vec::new();

        let secured_before: Vec<bool> = self.world.summaries().iter().map(|s| s.secured).collect();

        let ctx = TickContext {
            config: &self.config,
            policy: &self.inputs.policy,
            logistics: &self.inputs.logistics,
            strategy: self.current_strategy(),
            elapsed: self.elapsed,
        };
        let report = run_tick(&mut self.world, &ctx, &mut self.rng);

        events.extend(report.neutralized().map(|id| SimulationEvent::RedNeutralized {
            agent: id.to_string(),
            at,
        }));
        for (scope, summary) in self.world.summaries().into_iter().enumerate() {
            let was_secured = secured_before.get(scope).copied().unwrap_or(false);
            if summary.secured && !was_secured {
                tracing::info!("{} secured at {:.1}s", summary.name, at);
                events.push(SimulationEvent::TheaterSecured {
                    scope,
                    name: summary.name,
                    at,
                });
            }
        }

        self.metrics = compute_metrics(
            &self.world,
            &self.inputs.policy,
            &self.inputs.logistics,
            self.config.base_success_probability,
        );

        if self.inputs.exploring {
            let ctx = ExplorerContext {
                world: &self.world,
                policy: &self.inputs.policy,
                logistics: &self.inputs.logistics,
                elapsed: self.elapsed,
                dt,
            };
            for event in self.explorer.step(&ctx, &mut self.rng) {
                if matches!(event, ExplorerEvent::Halted { .. }) {
                    self.running = false;
                }
                events.push(SimulationEvent::from_explorer(event, at));
            }
        }

        self.ticks += 1;
        events
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resume a paused run. A run halted by the explorer stays stopped until
    /// reset, even if exploration has since been switched off.
    pub fn resume(&mut self) -> bool {
        if self.explorer.is_halted() {
            return false;
        }
        self.running = true;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rebuild the world for the current mode and clear time and exploration state
    pub fn reset(&mut self) {
        self.world = WorldState::generate(self.inputs.mode, &self.config, &mut self.rng);
        self.explorer.reset(&mut self.rng);
        self.explorer.set_active_strategy(self.inputs.strategy);
        self.elapsed = 0.0;
        self.ticks = 0;
        self.metrics = compute_metrics(
            &self.world,
            &self.inputs.policy,
            &self.inputs.logistics,
            self.config.base_success_probability,
        );
    }

    /// Switch world layout. Any change reinitializes the world.
    pub fn set_mode(&mut self, mode: SimMode) {
        if mode != self.inputs.mode {
            self.inputs.mode = mode;
            self.reset();
        }
    }

    pub fn set_policy(&mut self, policy: Policy) {
        self.inputs.policy = policy.clamped();
    }

    pub fn set_logistics(&mut self, logistics: Logistics) {
        self.inputs.logistics = logistics.clamped();
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.inputs.speed = clamp_speed(speed, self.config.max_speed);
    }

    /// Select the steering strategy. Periodic exploration takes over again at its next switch.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.inputs.strategy = strategy;
        self.explorer.set_active_strategy(strategy);
    }

    pub fn set_exploring(&mut self, exploring: bool) {
        self.inputs.exploring = exploring;
    }

    pub fn set_exploration_mode(&mut self, mode: ExplorationMode) {
        self.explorer.set_mode(mode);
    }

    /// Strategy that steers blue agents on the next tick
    pub fn current_strategy(&self) -> Strategy {
        if self.inputs.exploring && self.explorer.mode() == ExplorationMode::PeriodicSwitch {
            self.explorer.active_strategy()
        } else {
            self.inputs.strategy
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn inputs(&self) -> &ControlInputs {
        &self.inputs
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn metrics(&self) -> &MissionMetrics {
        &self.metrics
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        self.explorer.leaderboard()
    }

    pub fn explorer(&self) -> &CoaExplorer {
        &self.explorer
    }

    pub fn elapsed(&self) -> SimTime {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            mode: self.inputs.mode,
            elapsed: self.elapsed,
            ticks: self.ticks,
            running: self.running,
            exploring: self.inputs.exploring,
            exploration_mode: self.explorer.mode(),
            exploration_halted: self.explorer.is_halted(),
            current_strategy: self.current_strategy(),
            last_evaluated: self.explorer.last_strategy(),
            explored: self.explorer.explored(),
            leaderboard: self.explorer.leaderboard().entries().to_vec(),
            metrics: self.metrics.clone(),
            theaters: self.world.summaries(),
            world: self.world.clone(),
        }
    }
}

fn clamp_speed(speed: f64, max_speed: f64) -> f64 {
    if speed.is_nan() {
        0.0
    } else {
        speed.clamp(0.0, max_speed)
    }
}
