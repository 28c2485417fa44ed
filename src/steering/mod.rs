//! Steering model - maps an agent and its nearest target to a velocity
//!
//! Pure apart from `Dispersed`, which draws its heading offset from the
//! injected generator.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};
use std::fmt;

use crate::core::constants::{
    CONCENTRATED_WEAVE_AMPLITUDE, HITRUN_RETREAT_BOOST, HITRUN_RETREAT_DISTANCE,
};
use crate::core::types::{SimTime, Vec2};
use crate::world::agent::Agent;

const FLANK_OFFSET: f64 = 60.0 * PI / 180.0;
const PINCER_OFFSET: f64 = 72.0 * PI / 180.0;

/// Candidate course of action: a blue steering behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Direct,
    Flank,
    Pincer,
    Dispersed,
    Concentrated,
    HitRun,
}

impl Strategy {
    /// The fixed strategy set sampled by the explorer
    pub const ALL: [Strategy; 6] = [
        Strategy::Direct,
        Strategy::Flank,
        Strategy::Pincer,
        Strategy::Dispersed,
        Strategy::Concentrated,
        Strategy::HitRun,
    ];

    /// Parse a strategy label; unknown labels fall back to `Direct`
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "flank" => Strategy::Flank,
            "pincer" => Strategy::Pincer,
            "dispersed" => Strategy::Dispersed,
            "concentrated" => Strategy::Concentrated,
            "hitrun" | "hit-run" | "hit_run" => Strategy::HitRun,
            _ => Strategy::Direct,
        }
    }

    /// Uniform draw from `ALL`
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Base speed in arena units per tick
    pub fn base_speed(&self) -> f64 {
        match self {
            Strategy::Direct => 2.5,
            Strategy::Flank => 2.0,
            Strategy::Pincer => 2.0,
            Strategy::Dispersed => 1.8,
            Strategy::Concentrated => 3.0,
            Strategy::HitRun => 3.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Flank => "flank",
            Strategy::Pincer => "pincer",
            Strategy::Dispersed => "dispersed",
            Strategy::Concentrated => "concentrated",
            Strategy::HitRun => "hitrun",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Velocity for `agent` heading to `target` under `strategy`
///
/// No target means the agent holds position.
pub fn steer<R: Rng + ?Sized>(
    agent: &Agent,
    target: Option<Vec2>,
    strategy: Strategy,
    elapsed: SimTime,
    rng: &mut R,
) -> Vec2 {
    steer_with_retreat(agent, target, strategy, elapsed, HITRUN_RETREAT_DISTANCE, rng)
}

/// `steer` with an explicit hit-and-run break-off distance
pub fn steer_with_retreat<R: Rng + ?Sized>(
    agent: &Agent,
    target: Option<Vec2>,
    strategy: Strategy,
    elapsed: SimTime,
    retreat_distance: f64,
    rng: &mut R,
) -> Vec2 {
    let Some(target) = target else {
        return Vec2::ZERO;
    };

    let position = agent.position();
    let bearing = position.bearing_to(&target);
    let id = agent.id();
    // Even-numbered agents swing left, odd-numbered swing right
    let side = if id.is_even() { 1.0 } else { -1.0 };
    let speed = strategy.base_speed();

    let (angle, speed) = match strategy {
        Strategy::Direct => (bearing, speed),
        Strategy::Flank => (bearing + side * FLANK_OFFSET, speed),
        Strategy::Pincer => (bearing + side * PINCER_OFFSET, speed),
        Strategy::Dispersed => (bearing + rng.gen_range(-FRAC_PI_4..FRAC_PI_4), speed),
        Strategy::Concentrated => (
            bearing + (elapsed + id.number as f64).sin() * CONCENTRATED_WEAVE_AMPLITUDE,
            speed,
        ),
        Strategy::HitRun => {
            if position.distance(&target) < retreat_distance {
                (bearing + PI, speed * HITRUN_RETREAT_BOOST)
            } else {
                (bearing, speed)
            }
        }
    };

    Vec2::from_polar(angle, speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPS: f64 = 1e-9;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn blue_at(number: u32, x: f64, y: f64) -> Agent {
        Agent::blue(0, number, Vec2::new(x, y))
    }

    #[test]
    fn test_no_target_holds_position() {
        let agent = blue_at(0, 10.0, 10.0);
        for strategy in Strategy::ALL {
            assert_eq!(steer(&agent, None, strategy, 1.0, &mut rng()), Vec2::ZERO);
        }
    }

    #[test]
    fn test_direct_along_bearing() {
        let agent = blue_at(0, 0.0, 0.0);
        let v = steer(&agent, Some(Vec2::new(100.0, 0.0)), Strategy::Direct, 0.0, &mut rng());
        assert!((v.x - 2.5).abs() < EPS);
        assert!(v.y.abs() < EPS);

        let target = Vec2::new(30.0, 40.0);
        let v = steer(&agent, Some(target), Strategy::Direct, 5.0, &mut rng());
        assert!((v.angle() - (40.0f64).atan2(30.0)).abs() < EPS);
        assert!((v.length() - 2.5).abs() < EPS);
    }

    #[test]
    fn test_flank_side_follows_parity() {
        let target = Some(Vec2::new(100.0, 0.0));
        let even = steer(&blue_at(2, 0.0, 0.0), target, Strategy::Flank, 0.0, &mut rng());
        let odd = steer(&blue_at(3, 0.0, 0.0), target, Strategy::Flank, 0.0, &mut rng());
        assert!((even.angle() - FLANK_OFFSET).abs() < EPS);
        assert!((odd.angle() + FLANK_OFFSET).abs() < EPS);
        assert!((even.length() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_pincer_offset() {
        let target = Some(Vec2::new(100.0, 0.0));
        let v = steer(&blue_at(0, 0.0, 0.0), target, Strategy::Pincer, 0.0, &mut rng());
        assert!((v.angle() - PINCER_OFFSET).abs() < EPS);
    }

    #[test]
    fn test_dispersed_within_cone() {
        let agent = blue_at(0, 0.0, 0.0);
        let mut rng = rng();
        for _ in 0..200 {
            let v = steer(&agent, Some(Vec2::new(100.0, 0.0)), Strategy::Dispersed, 0.0, &mut rng);
            assert!(v.angle() >= -FRAC_PI_4 - EPS && v.angle() < FRAC_PI_4 + EPS);
            assert!((v.length() - 1.8).abs() < EPS);
        }
    }

    #[test]
    fn test_dispersed_reproducible_with_seed() {
        let agent = blue_at(5, 20.0, 30.0);
        let target = Some(Vec2::new(300.0, 250.0));
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..10)
                .map(|_| steer(&agent, target, Strategy::Dispersed, 0.0, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_concentrated_weave() {
        let agent = blue_at(4, 0.0, 0.0);
        let elapsed = 1.5;
        let v = steer(&agent, Some(Vec2::new(100.0, 0.0)), Strategy::Concentrated, elapsed, &mut rng());
        let expected = (elapsed + 4.0).sin() * 0.3;
        assert!((v.angle() - expected).abs() < EPS);
        assert!((v.length() - 3.0).abs() < EPS);
    }

    #[test]
    fn test_hitrun_retreats_when_close() {
        let agent = blue_at(0, 100.0, 100.0);
        let target = Vec2::new(150.0, 100.0);
        let v = steer(&agent, Some(target), Strategy::HitRun, 0.0, &mut rng());
        let bearing = agent.position().bearing_to(&target);
        assert!((v.x - (bearing + PI).cos() * 3.5 * 1.5).abs() < EPS);
        assert!((v.y - (bearing + PI).sin() * 3.5 * 1.5).abs() < EPS);
        assert!((v.length() - 5.25).abs() < EPS);
    }

    #[test]
    fn test_hitrun_closes_when_far() {
        let agent = blue_at(0, 0.0, 0.0);
        let v = steer(&agent, Some(Vec2::new(200.0, 0.0)), Strategy::HitRun, 0.0, &mut rng());
        assert!((v.x - 3.5).abs() < EPS);
        assert!(v.y.abs() < EPS);
    }

    #[test]
    fn test_unknown_label_falls_back_to_direct() {
        assert_eq!(Strategy::parse("feint"), Strategy::Direct);
        assert_eq!(Strategy::parse("HitRun"), Strategy::HitRun);
        assert_eq!(Strategy::parse("pincer"), Strategy::Pincer);
    }

    #[test]
    fn test_labels_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::parse(strategy.label()), strategy);
        }
    }
}
