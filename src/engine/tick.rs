//! Tick engine - advances every scope by one step
//!
//! Per scope, in order:
//! movement pass -> damage pass
//!
//! Each pass reads a snapshot taken before it starts and writes its results
//! as a batch, so roster order never changes what an agent sees within a pass.
//! Scopes are independent and may run on the rayon pool.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::core::config::{DamageModel, EngineConfig};
use crate::core::types::{AgentId, SimTime, Vec2};
use crate::engine::engagement::{active_blue_markers, engaging, living_red_markers, nearest};
use crate::policy::{Logistics, Policy};
use crate::steering::{steer_with_retreat, Strategy};
use crate::world::agent::Agent;
use crate::world::state::WorldState;

/// Read-only inputs for one tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub config: &'a EngineConfig,
    pub policy: &'a Policy,
    pub logistics: &'a Logistics,
    pub strategy: Strategy,
    pub elapsed: SimTime,
}

/// What one scope did during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeOutcome {
    /// Blue agents that had a target and moved
    pub moved: usize,
    /// Successful hits landed on red agents
    pub hits: u32,
    /// Health removed from red agents
    pub damage: u32,
    /// Red agents brought to zero health this tick
    pub neutralized: Vec<AgentId>,
}

/// Per-scope outcomes, in scope order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub scopes: Vec<ScopeOutcome>,
}

impl TickReport {
    pub fn total_hits(&self) -> u32 {
        self.scopes.iter().map(|s| s.hits).sum()
    }

    pub fn total_damage(&self) -> u32 {
        self.scopes.iter().map(|s| s.damage).sum()
    }

    pub fn neutralized(&self) -> impl Iterator<Item = &AgentId> {
        self.scopes.iter().flat_map(|s| s.neutralized.iter())
    }
}

/// Advance the whole world one step
pub fn run_tick<R: Rng + ?Sized>(
    world: &mut WorldState,
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> TickReport {
    let scopes = world.scopes_mut();

    let outcomes = if ctx.config.parallel_theaters && scopes.len() > 1 {
        // Seeds are drawn up front so results depend only on the master stream
        let seeds: Vec<u64> = scopes.iter().map(|_| rng.gen()).collect();
        scopes
            .into_par_iter()
            .zip(seeds)
            .map(|(agents, seed)| {
                let mut scope_rng = ChaCha8Rng::seed_from_u64(seed);
                tick_scope(agents, ctx, &mut scope_rng)
            })
            .collect()
    } else {
        scopes
            .into_iter()
            .map(|agents| tick_scope(agents, ctx, &mut *rng))
            .collect()
    };

    TickReport { scopes: outcomes }
}

/// Advance one independent roster
pub fn tick_scope<R: Rng + ?Sized>(
    agents: &mut [Agent],
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> ScopeOutcome {
    let moved = movement_pass(agents, ctx, rng);
    let mut outcome = damage_pass(agents, ctx, rng);
    outcome.moved = moved;
    outcome
}

/// Steer every active blue agent towards its nearest living red agent
///
/// Returns the number of agents that moved.
pub fn movement_pass<R: Rng + ?Sized>(
    agents: &mut [Agent],
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> usize {
    let targets = living_red_markers(agents);
    let displacement_scale =
        ctx.policy.roe.aggression_modifier() * ctx.logistics.transport_factor();
    let grid_size = ctx.config.grid_size;

    let planned: Vec<(usize, Option<(Vec2, Vec2)>)> = agents
        .iter()
        .enumerate()
        .filter(|(_, agent)| agent.is_active_blue())
        .map(|(i, agent)| {
            let target = nearest(agent.position(), &targets).map(|((_, pos), _)| pos);
            let motion = target.map(|target| {
                let velocity = steer_with_retreat(
                    agent,
                    Some(target),
                    ctx.strategy,
                    ctx.elapsed,
                    ctx.config.hitrun_retreat_distance,
                    &mut *rng,
                ) * displacement_scale;
                let position = (agent.position() + velocity).clamp_to_arena(grid_size);
                (velocity, position)
            });
            (i, motion)
        })
        .collect();

    let mut moved = 0;
    for (i, motion) in planned {
        match motion {
            Some((velocity, position)) => {
                agents[i].set_motion(velocity, position);
                moved += 1;
            }
            None => agents[i].set_velocity(Vec2::ZERO),
        }
    }
    moved
}

/// Apply engagement damage from active blue agents to living red agents
///
/// Damage per red agent is `round(hits * hit_damage * roe aggression)`.
/// Force level is not applied here; it only feeds metrics and COA scoring.
pub fn damage_pass<R: Rng + ?Sized>(
    agents: &mut [Agent],
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> ScopeOutcome {
    let shooters = active_blue_markers(agents);
    let targets = living_red_markers(agents);
    let hit_probability = ctx.logistics.hit_probability();
    let damage_per_hit = ctx.config.hit_damage * ctx.policy.roe.aggression_modifier();
    let range = ctx.config.engagement_distance;

    let planned: Vec<(usize, u32, u32)> = targets
        .iter()
        .filter_map(|&(red_index, red_position)| {
            let mut hits = 0u32;
            for _ in engaging(red_position, &shooters, range) {
                let landed = match ctx.config.damage_model {
                    DamageModel::Probabilistic => rng.gen::<f64>() < hit_probability,
                    DamageModel::Deterministic => true,
                };
                if landed {
                    hits += 1;
                }
            }
            let damage = (hits as f64 * damage_per_hit).round() as u32;
            (hits > 0).then_some((red_index, hits, damage))
        })
        .collect();

    let mut outcome = ScopeOutcome::default();
    for (red_index, hits, damage) in planned {
        let before = agents[red_index].health().unwrap_or(0);
        if agents[red_index].apply_damage(damage) {
            let id = agents[red_index].id();
            tracing::debug!("{} neutralized", id);
            outcome.neutralized.push(id);
        }
        let after = agents[red_index].health().unwrap_or(0);
        outcome.hits += hits;
        outcome.damage += before - after;
    }
    outcome
}
