//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::SimError;

/// Side an agent fights for. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Blue => "blue",
            Team::Red => "red",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent identity: team, owning theater and a sequential number.
///
/// The number doubles as a per-agent seed for steering variety
/// (flank side, weave phase). Renders and serializes as `blue-2-7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AgentId {
    pub team: Team,
    pub theater: u32,
    pub number: u32,
}

impl AgentId {
    pub fn new(team: Team, theater: u32, number: u32) -> Self {
        Self {
            team,
            theater,
            number,
        }
    }

    /// Parity of the sequential number, used to pick a flanking side
    pub fn is_even(&self) -> bool {
        self.number % 2 == 0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.team, self.theater, self.number)
    }
}

impl FromStr for AgentId {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SimError::InvalidAgentId(s.to_string());
        let mut parts = s.splitn(3, '-');
        let team = match parts.next() {
            Some("blue") => Team::Blue,
            Some("red") => Team::Red,
            _ => return Err(invalid()),
        };
        let theater = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let number = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        Ok(Self::new(team, theater, number))
    }
}

impl TryFrom<String> for AgentId {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.to_string()
    }
}

/// Simulation time in seconds
pub type SimTime = f64;

/// 2D position or velocity in arena units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a vector from an angle (radians) and a magnitude
    pub fn from_polar(angle: f64, magnitude: f64) -> Self {
        Self::new(angle.cos() * magnitude, angle.sin() * magnitude)
    }

    pub fn distance(&self, other: &Vec2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Bearing from `self` towards `other`, in radians
    pub fn bearing_to(&self, other: &Vec2) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Clamp both axes into `[0, size]`
    pub fn clamp_to_arena(&self, size: f64) -> Self {
        Self::new(self.x.clamp(0.0, size), self.y.clamp(0.0, size))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}
