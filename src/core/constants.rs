//! Engine constants - all tunable defaults in one place
//!
//! `EngineConfig::default()` is built from these. Distances are arena units,
//! times are simulation seconds.

// Arena
pub const GRID_SIZE: f64 = 600.0;

// Engagement
pub const ENGAGEMENT_DISTANCE: f64 = 35.0;
pub const HIT_DAMAGE: f64 = 2.0;
pub const MAX_HEALTH: u32 = 100;

// Metrics
pub const BASE_SUCCESS_PROBABILITY: f64 = 50.0;
pub const FORCE_RATIO_WEIGHT: f64 = 30.0;
pub const CASUALTY_FACTOR: f64 = 0.3;
pub const COVERAGE_FORCE_THRESHOLD: f64 = 80.0;
pub const COVERAGE_GAP_SECTORS: [&str; 2] = ["Northern Approach", "Eastern Corridor"];
/// Reported as time-to-objective when supply and comms are both zero
pub const TIME_TO_OBJECTIVE_UNBOUNDED: u32 = u32::MAX;

// Strategy switching (seconds)
pub const STRATEGY_SWITCH_TIME_MIN: f64 = 3.0;
pub const STRATEGY_SWITCH_TIME_MAX: f64 = 8.0;

// Steering
pub const HITRUN_RETREAT_DISTANCE: f64 = 80.0;
pub const HITRUN_RETREAT_BOOST: f64 = 1.5;
pub const CONCENTRATED_WEAVE_AMPLITUDE: f64 = 0.3;

// Explorer
pub const LEADERBOARD_CAPACITY: usize = 50;
pub const EXPLORATION_CAP: u64 = 20_000;
pub const SCORE_JITTER_MIN: f64 = 0.85;
pub const SCORE_JITTER_MAX: f64 = 1.15;

// Initialization
pub const DEFAULT_THEATER_COUNT: u32 = 4;
pub const THEATER_BLUE_MIN: u32 = 8;
pub const THEATER_BLUE_MAX: u32 = 12;
pub const THEATER_RED_MIN: u32 = 2;
pub const THEATER_RED_MAX: u32 = 4;
pub const STANDARD_BLUE_COUNT: u32 = 20;
pub const STANDARD_RED_COUNT: u32 = 6;

// Control
pub const MAX_SPEED_MULTIPLIER: f64 = 10.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_window_ordered() {
        assert!(STRATEGY_SWITCH_TIME_MIN > 0.0);
        assert!(STRATEGY_SWITCH_TIME_MAX >= STRATEGY_SWITCH_TIME_MIN);
    }

    #[test]
    fn test_engagement_fits_arena() {
        assert!(ENGAGEMENT_DISTANCE < GRID_SIZE);
        assert!(HITRUN_RETREAT_DISTANCE > ENGAGEMENT_DISTANCE);
    }

    #[test]
    fn test_roster_ranges_ordered() {
        assert!(THEATER_BLUE_MIN <= THEATER_BLUE_MAX);
        assert!(THEATER_RED_MIN <= THEATER_RED_MAX);
        assert!(STANDARD_BLUE_COUNT > 0 && STANDARD_RED_COUNT > 0);
    }
}
