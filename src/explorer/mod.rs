//! COA explorer - samples strategies, scores them and keeps the best
//!
//! One engine, two modes:
//! - periodic switch: the explorer owns the active steering strategy and
//!   swaps it on a randomized timer, scoring the strategy it leaves
//! - continuous: every tick a random strategy is scored on the side, until
//!   the evaluation cap halts the run
//!
//! The explorer only reads the world.

pub mod leaderboard;
pub mod scoring;

use rand::Rng;

use crate::core::config::{EngineConfig, ExplorationMode};
use crate::core::types::SimTime;
use crate::policy::{Logistics, Policy};
use crate::steering::Strategy;
use crate::world::state::WorldState;

pub use leaderboard::{CoaRecord, Leaderboard};
pub use scoring::{
    average_target_distance, proximity_score, score_composite, score_proximity, CompositeWeights,
    ProximityWeights,
};

/// Read-only inputs for one explorer step
#[derive(Debug, Clone, Copy)]
pub struct ExplorerContext<'a> {
    pub world: &'a WorldState,
    pub policy: &'a Policy,
    pub logistics: &'a Logistics,
    /// Simulation time after this tick
    pub elapsed: SimTime,
    /// Simulation time covered by this tick
    pub dt: SimTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerEvent {
    StrategySwitched { from: Strategy, to: Strategy },
    Evaluated { record: CoaRecord, ranked: bool },
    Halted { explored: u64 },
}

#[derive(Debug, Clone)]
pub struct CoaExplorer {
    mode: ExplorationMode,
    leaderboard: Leaderboard,
    explored: u64,
    exploration_cap: u64,
    switch_window: (f64, f64),
    strategy_timer: f64,
    switch_threshold: f64,
    active_strategy: Strategy,
    last_strategy: Option<Strategy>,
    halted: bool,
    proximity_weights: ProximityWeights,
    composite_weights: CompositeWeights,
}

impl CoaExplorer {
    pub fn new<R: Rng + ?Sized>(config: &EngineConfig, rng: &mut R) -> Self {
        let switch_window = (config.strategy_switch_min, config.strategy_switch_max);
        Self {
            mode: config.exploration_mode,
            leaderboard: Leaderboard::new(config.leaderboard_capacity),
            explored: 0,
            exploration_cap: config.exploration_cap,
            switch_window,
            strategy_timer: 0.0,
            switch_threshold: draw_threshold(switch_window, rng),
            active_strategy: Strategy::default(),
            last_strategy: None,
            halted: false,
            proximity_weights: ProximityWeights::default(),
            composite_weights: CompositeWeights::default(),
        }
    }

    pub fn mode(&self) -> ExplorationMode {
        self.mode
    }

    /// Change mode. The leaderboard is cleared so the two score scales never mix.
    pub fn set_mode(&mut self, mode: ExplorationMode) {
        if mode != self.mode {
            tracing::info!("Exploration mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.leaderboard.clear();
            self.strategy_timer = 0.0;
        }
    }

    /// Forget all evaluations and restart the switch timer
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.leaderboard.clear();
        self.explored = 0;
        self.strategy_timer = 0.0;
        self.switch_threshold = draw_threshold(self.switch_window, rng);
        self.last_strategy = None;
        self.halted = false;
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Evaluations recorded since the last reset, whether ranked or not
    pub fn explored(&self) -> u64 {
        self.explored
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Strategy steering blue agents in periodic-switch mode
    pub fn active_strategy(&self) -> Strategy {
        self.active_strategy
    }

    pub fn set_active_strategy(&mut self, strategy: Strategy) {
        self.active_strategy = strategy;
    }

    /// Most recently evaluated strategy
    pub fn last_strategy(&self) -> Option<Strategy> {
        self.last_strategy
    }

    pub fn strategy_timer(&self) -> f64 {
        self.strategy_timer
    }

    pub fn switch_threshold(&self) -> f64 {
        self.switch_threshold
    }

    /// Run one explorer step after the tick engine and metrics
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        ctx: &ExplorerContext<'_>,
        rng: &mut R,
    ) -> Vec<ExplorerEvent> {
        if self.halted {
            return Vec::new();
        }
        match self.mode {
            ExplorationMode::PeriodicSwitch => self.step_periodic(ctx, rng),
            ExplorationMode::Continuous => self.step_continuous(ctx, rng),
        }
    }

    fn step_periodic<R: Rng + ?Sized>(
        &mut self,
        ctx: &ExplorerContext<'_>,
        rng: &mut R,
    ) -> Vec<ExplorerEvent> {
        self.strategy_timer += ctx.dt;
        if self.strategy_timer <= self.switch_threshold {
            return Vec::new();
        }

        let outgoing = self.active_strategy;
        let score = score_proximity(
            ctx.world,
            ctx.policy,
            ctx.logistics,
            &self.proximity_weights,
            rng,
        );
        let evaluated = self.record(outgoing, score, ctx.elapsed, rng);

        let incoming = Strategy::sample(rng);
        self.active_strategy = incoming;
        self.strategy_timer = 0.0;
        self.switch_threshold = draw_threshold(self.switch_window, rng);

        tracing::debug!(
            "Strategy switch {} -> {} (score {}, next switch in {:.1}s)",
            outgoing,
            incoming,
            score,
            self.switch_threshold
        );

        vec![
            evaluated,
            ExplorerEvent::StrategySwitched {
                from: outgoing,
                to: incoming,
            },
        ]
    }

    fn step_continuous<R: Rng + ?Sized>(
        &mut self,
        ctx: &ExplorerContext<'_>,
        rng: &mut R,
    ) -> Vec<ExplorerEvent> {
        let strategy = Strategy::sample(rng);
        let score = score_composite(ctx.policy, ctx.logistics, &self.composite_weights, rng);
        let mut events = vec![self.record(strategy, score, ctx.elapsed, rng)];

        if self.explored >= self.exploration_cap {
            self.halted = true;
            tracing::info!("Exploration halted after {} evaluations", self.explored);
            events.push(ExplorerEvent::Halted {
                explored: self.explored,
            });
        }
        events
    }

    fn record<R: Rng + ?Sized>(
        &mut self,
        strategy: Strategy,
        score: f64,
        elapsed: SimTime,
        rng: &mut R,
    ) -> ExplorerEvent {
        let record = CoaRecord::new(strategy, score, elapsed, rng);
        let ranked = self.leaderboard.insert(record.clone());
        self.explored += 1;
        self.last_strategy = Some(strategy);
        ExplorerEvent::Evaluated { record, ranked }
    }
}

fn draw_threshold<R: Rng + ?Sized>((min, max): (f64, f64), rng: &mut R) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
