//! Mission metrics - derived every tick from the world and operator inputs
//!
//! Nothing here is stored between ticks.

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    CASUALTY_FACTOR, COVERAGE_FORCE_THRESHOLD, COVERAGE_GAP_SECTORS, FORCE_RATIO_WEIGHT,
    TIME_TO_OBJECTIVE_UNBOUNDED,
};
use crate::policy::{Logistics, Policy};
use crate::world::state::WorldState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionMetrics {
    /// 0-100
    pub success_probability: f64,
    pub predicted_casualties: u32,
    /// Seconds; `TIME_TO_OBJECTIVE_UNBOUNDED` when logistics are fully cut
    pub time_to_objective: u32,
    /// 0-100
    pub resource_consumption: u32,
    pub coverage_gaps: Vec<String>,
}

impl Default for MissionMetrics {
    fn default() -> Self {
        Self {
            success_probability: 0.0,
            predicted_casualties: 0,
            time_to_objective: TIME_TO_OBJECTIVE_UNBOUNDED,
            resource_consumption: 0,
            coverage_gaps: Vec::new(),
        }
    }
}

/// Metrics over the whole population, flattened across theaters
pub fn compute_metrics(
    world: &WorldState,
    policy: &Policy,
    logistics: &Logistics,
    base_success_probability: f64,
) -> MissionMetrics {
    compute_from_counts(
        world.active_blue_count(),
        world.living_red_count(),
        policy,
        logistics,
        base_success_probability,
    )
}

/// Metrics from raw force counts
pub fn compute_from_counts(
    active_blue: usize,
    active_red: usize,
    policy: &Policy,
    logistics: &Logistics,
    base_success_probability: f64,
) -> MissionMetrics {
    let force_level = policy.force_level / 100.0;
    let logistics_mod = logistics.logistics_modifier();

    let force_ratio = active_blue as f64 / active_red.max(1) as f64;
    let success_probability = ((base_success_probability + (force_ratio - 1.0) * FORCE_RATIO_WEIGHT)
        * force_level
        * logistics_mod
        * policy.roe.success_modifier())
    .clamp(0.0, 100.0);

    let predicted_casualties =
        (active_blue as f64 * (1.0 - force_level) * CASUALTY_FACTOR).floor().max(0.0) as u32;

    let time_to_objective = if logistics_mod > 0.0 {
        (100.0 / (logistics_mod * 2.0)).floor() as u32
    } else {
        TIME_TO_OBJECTIVE_UNBOUNDED
    };

    let resource_consumption = (100.0 - logistics.supply_rate).floor().clamp(0.0, 100.0) as u32;

    let coverage_gaps = if policy.force_level < COVERAGE_FORCE_THRESHOLD {
        COVERAGE_GAP_SECTORS.iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    };

    MissionMetrics {
        success_probability,
        predicted_casualties,
        time_to_objective,
        resource_consumption,
        coverage_gaps,
    }
}
