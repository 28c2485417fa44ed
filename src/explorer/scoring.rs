//! COA scoring
//!
//! Heuristic fitness signals for ranking strategies. Both formulas are
//! stochastic and approximate.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::{SCORE_JITTER_MAX, SCORE_JITTER_MIN};
use crate::engine::engagement::{active_blue_markers, living_red_markers, nearest};
use crate::policy::{Logistics, Policy};
use crate::world::state::WorldState;

/// Arena units of average separation that cost one proximity point
const PROXIMITY_DISTANCE_DIVISOR: f64 = 5.0;

/// Weights for the proximity score (periodic-switch mode)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityWeights {
    /// Multiplier for the 0-100 proximity score
    pub proximity: f64,
    /// Multiplier for force level (0-100)
    pub force_level: f64,
    /// Multiplier for comms reliability (0-100)
    pub comms: f64,
}

impl Default for ProximityWeights {
    fn default() -> Self {
        Self {
            proximity: 0.5,
            force_level: 0.3,
            comms: 0.2,
        }
    }
}

/// Weights for the composite score (continuous-exploration mode)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    /// Points spread uniformly over `[0, randomness)`
    pub randomness: f64,
    pub force_level: f64,
    pub supply: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            randomness: 40.0,
            force_level: 0.3,
            supply: 0.3,
        }
    }
}

/// Average distance from each active blue agent to its nearest living red
/// agent in the same scope. `None` when no blue agent has a target.
pub fn average_target_distance(world: &WorldState) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0usize;

    for agents in world.scopes() {
        let targets = living_red_markers(agents);
        for (_, position) in active_blue_markers(agents) {
            if let Some((_, distance)) = nearest(position, &targets) {
                total += distance;
                count += 1;
            }
        }
    }

    (count > 0).then(|| total / count as f64)
}

/// `max(0, 100 - avgDistance / 5)`; 0 when nothing is engaged
pub fn proximity_score(world: &WorldState) -> f64 {
    average_target_distance(world)
        .map(|avg| (100.0 - avg / PROXIMITY_DISTANCE_DIVISOR).max(0.0))
        .unwrap_or(0.0)
}

/// Proximity-based COA score in `0..=100`, floored to a whole number
pub fn score_proximity<R: Rng + ?Sized>(
    world: &WorldState,
    policy: &Policy,
    logistics: &Logistics,
    weights: &ProximityWeights,
    rng: &mut R,
) -> f64 {
    let raw = proximity_score(world) * weights.proximity
        + policy.force_level * weights.force_level
        + logistics.comms_reliability * weights.comms;
    let jitter = rng.gen_range(SCORE_JITTER_MIN..=SCORE_JITTER_MAX);
    (raw * jitter).clamp(0.0, 100.0).floor()
}

/// Composite COA score, roughly 0-100 and deliberately not clamped
pub fn score_composite<R: Rng + ?Sized>(
    policy: &Policy,
    logistics: &Logistics,
    weights: &CompositeWeights,
    rng: &mut R,
) -> f64 {
    rng.gen::<f64>() * weights.randomness
        + policy.force_level * weights.force_level
        + logistics.supply_rate * weights.supply
}
