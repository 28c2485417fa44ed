//! Control loop integration tests
//!
//! Frames through `Simulation` the way a driving surface would: mode
//! switches, pause/resume, exploration halting and snapshot output.

use theater_coa::control::{ControlInputs, Simulation, SimulationEvent, SimulationSnapshot};
use theater_coa::core::config::{load_config, DamageModel, EngineConfig, ExplorationMode};
use theater_coa::core::constants::TIME_TO_OBJECTIVE_UNBOUNDED;
use theater_coa::policy::{Logistics, Policy};
use theater_coa::steering::Strategy;
use theater_coa::world::SimMode;

const FRAME: f64 = 1.0 / 60.0;

fn run_frames(sim: &mut Simulation, frames: usize) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(sim.frame(FRAME));
    }
    events
}

#[test]
fn test_mode_switch_reinitializes_everything() {
    let mut sim = Simulation::new(EngineConfig::default(), 21).unwrap();
    run_frames(&mut sim, 900);
    assert!(sim.elapsed() > 0.0);
    assert!(sim.explorer().explored() > 0);

    sim.set_mode(SimMode::Standard);

    assert_eq!(sim.elapsed(), 0.0);
    assert_eq!(sim.ticks(), 0);
    assert_eq!(sim.explorer().explored(), 0);
    assert!(sim.leaderboard().is_empty());
    assert_eq!(sim.explorer().strategy_timer(), 0.0);
    assert_eq!(sim.world().mode(), SimMode::Standard);
    assert_eq!(sim.world().active_blue_count(), 20);
    assert_eq!(sim.world().living_red_count(), 6);
}

#[test]
fn test_same_mode_does_not_reset() {
    let mut sim = Simulation::new(EngineConfig::default(), 22).unwrap();
    run_frames(&mut sim, 10);
    sim.set_mode(SimMode::MultiTheater);
    assert_eq!(sim.ticks(), 10);
}

#[test]
fn test_continuous_exploration_halts_run() {
    let config = EngineConfig {
        exploration_mode: ExplorationMode::Continuous,
        exploration_cap: 50,
        leaderboard_capacity: 10,
        ..EngineConfig::default()
    };
    let mut sim = Simulation::new(config, 23).unwrap();

    let events = run_frames(&mut sim, 100);

    assert!(!sim.is_running());
    assert_eq!(sim.ticks(), 50);
    assert_eq!(sim.explorer().explored(), 50);
    assert_eq!(sim.leaderboard().len(), 10);
    let halts = events
        .iter()
        .filter(|e| matches!(e, SimulationEvent::ExplorationHalted { .. }))
        .count();
    assert_eq!(halts, 1);

    // Halt is final until reset
    assert!(!sim.resume());
    sim.reset();
    assert!(sim.resume());
    sim.frame(FRAME);
    assert_eq!(sim.explorer().explored(), 1);
}

#[test]
fn test_exploration_mode_change_clears_leaderboard() {
    let mut sim = Simulation::new(EngineConfig::default(), 24).unwrap();
    sim.set_exploration_mode(ExplorationMode::Continuous);
    run_frames(&mut sim, 20);
    assert_eq!(sim.leaderboard().len(), 20);

    sim.set_exploration_mode(ExplorationMode::PeriodicSwitch);
    assert!(sim.leaderboard().is_empty());
}

#[test]
fn test_periodic_exploration_drives_steering() {
    let mut sim = Simulation::new(EngineConfig::default(), 25).unwrap();
    let events = run_frames(&mut sim, 60 * 30);

    let switches: Vec<(Strategy, Strategy)> = events
        .iter()
        .filter_map(|e| match e {
            SimulationEvent::StrategySwitched { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert!(switches.len() >= 3);
    assert_eq!(switches[0].0, Strategy::Direct);
    for pair in switches.windows(2) {
        assert_eq!(pair[0].1, pair[1].0);
    }
    assert_eq!(sim.current_strategy(), switches[switches.len() - 1].1);
}

#[test]
fn test_neutralization_and_securing_events() {
    let config = EngineConfig {
        damage_model: DamageModel::Deterministic,
        theater_count: 2,
        ..EngineConfig::default()
    };
    let inputs = ControlInputs {
        exploring: false,
        speed: 10.0,
        ..ControlInputs::default()
    };
    let mut sim = Simulation::with_inputs(config, inputs, 26).unwrap();
    let red_total = sim.world().living_red_count();

    let events = run_frames(&mut sim, 5000);

    let neutralized = events
        .iter()
        .filter(|e| matches!(e, SimulationEvent::RedNeutralized { .. }))
        .count();
    let secured = events
        .iter()
        .filter(|e| matches!(e, SimulationEvent::TheaterSecured { .. }))
        .count();
    assert_eq!(sim.world().living_red_count(), 0);
    assert_eq!(neutralized, red_total);
    assert_eq!(secured, 2);
    assert!(sim.snapshot().theaters.iter().all(|t| t.secured));
}

#[test]
fn test_out_of_range_inputs_are_clamped() {
    let inputs = ControlInputs {
        policy: Policy {
            force_level: -20.0,
            risk_tolerance: 400.0,
            ..Policy::default()
        },
        logistics: Logistics {
            supply_rate: 0.0,
            comms_reliability: -5.0,
            ..Logistics::default()
        },
        speed: 50.0,
        ..ControlInputs::default()
    };
    let sim = Simulation::with_inputs(EngineConfig::default(), inputs, 27).unwrap();

    assert_eq!(sim.inputs().policy.force_level, 0.0);
    assert_eq!(sim.inputs().policy.risk_tolerance, 100.0);
    assert_eq!(sim.inputs().logistics.comms_reliability, 0.0);
    assert_eq!(sim.inputs().speed, 10.0);
    assert_eq!(sim.metrics().time_to_objective, TIME_TO_OBJECTIVE_UNBOUNDED);
    assert_eq!(sim.metrics().success_probability, 0.0);
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut sim = Simulation::new(EngineConfig::default(), 28).unwrap();
    run_frames(&mut sim, 600);
    let snapshot = sim.snapshot();

    let json = snapshot.to_json().unwrap();
    assert!(json.contains("\"mode\": \"multi-theater\""));
    assert!(json.contains("\"successProbability\""));
    assert!(json.contains("\"id\": \"blue-0-0\""));
    assert!(json.contains("\"id\": \"red-3-0\""));

    let parsed: SimulationSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.ticks, snapshot.ticks);
    assert_eq!(parsed.theaters, snapshot.theaters);
    assert_eq!(parsed.leaderboard.len(), snapshot.leaderboard.len());
    assert!(snapshot.summary().contains("multi-theater mode"));
}

#[test]
fn test_same_seed_same_run() {
    let mut a = Simulation::new(EngineConfig::default(), 29).unwrap();
    let mut b = Simulation::new(EngineConfig::default(), 29).unwrap();
    assert_eq!(run_frames(&mut a, 300), run_frames(&mut b, 300));
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_default_config_file_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/config/default.toml");
    let config = load_config(path).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_halt_survives_exploration_toggle() {
    let config = EngineConfig {
        exploration_mode: ExplorationMode::Continuous,
        exploration_cap: 5,
        ..EngineConfig::default()
    };
    let mut sim = Simulation::new(config, 30).unwrap();
    run_frames(&mut sim, 10);
    assert!(!sim.is_running());
    assert_eq!(sim.ticks(), 5);

    sim.set_exploring(false);
    assert!(!sim.resume());
    sim.set_exploring(true);
    run_frames(&mut sim, 100);

    assert!(!sim.is_running());
    assert!(sim.explorer().is_halted());
    assert_eq!(sim.ticks(), 5);
    assert_eq!(sim.explorer().explored(), 5);
}
