//! Agents - the blue and red force elements
//!
//! Team-specific data lives in `AgentState`, so an agent's team is fixed by
//! construction. Position, velocity and health are only written by the tick
//! engine.

use serde::{Deserialize, Serialize};

use crate::core::constants::MAX_HEALTH;
use crate::core::types::{AgentId, Team, Vec2};

/// Blue-side element state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueState {
    pub velocity: Vec2,
    pub active: bool,
    /// Reserved gauge, not consumed by the engine
    pub fuel: Option<f64>,
    /// Reserved gauge, not consumed by the engine
    pub ammo: Option<u32>,
}

/// Red-side element state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedState {
    /// 0..=100, neutralized at 0
    pub health: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "team", rename_all = "lowercase")]
pub enum AgentState {
    Blue(BlueState),
    Red(RedState),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    position: Vec2,
    #[serde(flatten)]
    state: AgentState,
}

impl Agent {
    /// Active blue agent at rest, without resource gauges
    pub fn blue(theater: u32, number: u32, position: Vec2) -> Self {
        Self {
            id: AgentId::new(Team::Blue, theater, number),
            position,
            state: AgentState::Blue(BlueState {
                velocity: Vec2::ZERO,
                active: true,
                fuel: None,
                ammo: None,
            }),
        }
    }

    /// Red agent with the given health (capped at full health)
    pub fn red(theater: u32, number: u32, position: Vec2, health: u32) -> Self {
        Self {
            id: AgentId::new(Team::Red, theater, number),
            position,
            state: AgentState::Red(RedState {
                health: health.min(MAX_HEALTH),
            }),
        }
    }

    /// Blue agent taken out of action. No effect on red agents.
    pub fn deactivated(mut self) -> Self {
        if let AgentState::Blue(blue) = &mut self.state {
            blue.active = false;
        }
        self
    }

    /// Attach resource gauges to a blue agent. No effect on red agents.
    pub fn with_supplies(mut self, fuel: f64, ammo: u32) -> Self {
        if let AgentState::Blue(blue) = &mut self.state {
            blue.fuel = Some(fuel);
            blue.ammo = Some(ammo);
        }
        self
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn team(&self) -> Team {
        match self.state {
            AgentState::Blue(_) => Team::Blue,
            AgentState::Red(_) => Team::Red,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Velocity of the last movement pass; always zero for red
    pub fn velocity(&self) -> Vec2 {
        match &self.state {
            AgentState::Blue(blue) => blue.velocity,
            AgentState::Red(_) => Vec2::ZERO,
        }
    }

    /// Red health, `None` for blue
    pub fn health(&self) -> Option<u32> {
        match &self.state {
            AgentState::Red(red) => Some(red.health),
            AgentState::Blue(_) => None,
        }
    }

    pub fn is_active_blue(&self) -> bool {
        matches!(&self.state, AgentState::Blue(blue) if blue.active)
    }

    pub fn is_living_red(&self) -> bool {
        matches!(&self.state, AgentState::Red(red) if red.health > 0)
    }

    pub(crate) fn set_motion(&mut self, velocity: Vec2, position: Vec2) {
        if let AgentState::Blue(blue) = &mut self.state {
            blue.velocity = velocity;
        }
        self.position = position;
    }

    pub(crate) fn set_velocity(&mut self, velocity: Vec2) {
        if let AgentState::Blue(blue) = &mut self.state {
            blue.velocity = velocity;
        }
    }

    /// Subtract damage, flooring health at zero. Returns true if this hit neutralized the agent.
    pub(crate) fn apply_damage(&mut self, damage: u32) -> bool {
        match &mut self.state {
            AgentState::Red(red) if red.health > 0 => {
                red.health = red.health.saturating_sub(damage);
                red.health == 0
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blue_defaults() {
        let agent = Agent::blue(1, 4, Vec2::new(10.0, 20.0));
        assert_eq!(agent.team(), Team::Blue);
        assert!(agent.is_active_blue());
        assert_eq!(agent.health(), None);
        assert_eq!(agent.id().to_string(), "blue-1-4");
    }

    #[test]
    fn test_red_health_capped() {
        let agent = Agent::red(0, 0, Vec2::ZERO, 250);
        assert_eq!(agent.health(), Some(100));
        assert!(agent.is_living_red());
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut agent = Agent::red(0, 0, Vec2::ZERO, 3);
        assert!(agent.apply_damage(5));
        assert_eq!(agent.health(), Some(0));
        assert!(!agent.is_living_red());
        // Already neutralized: further damage reports nothing new
        assert!(!agent.apply_damage(5));
    }

    #[test]
    fn test_damage_ignores_blue() {
        let mut agent = Agent::blue(0, 0, Vec2::ZERO);
        assert!(!agent.apply_damage(10));
        assert!(agent.is_active_blue());
    }

    #[test]
    fn test_deactivated_and_supplies() {
        let agent = Agent::blue(0, 2, Vec2::ZERO).with_supplies(100.0, 30).deactivated();
        assert!(!agent.is_active_blue());
        match agent.state() {
            AgentState::Blue(blue) => {
                assert_eq!(blue.fuel, Some(100.0));
                assert_eq!(blue.ammo, Some(30));
            }
            AgentState::Red(_) => panic!("expected blue"),
        }
    }

    #[test]
    fn test_red_velocity_is_zero() {
        let mut agent = Agent::red(0, 0, Vec2::new(5.0, 5.0), 100);
        agent.set_velocity(Vec2::new(1.0, 1.0));
        assert_eq!(agent.velocity(), Vec2::ZERO);
    }
}
